//! JSON report of a study.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::{
    analysis::{ComplexityResult, ComplexitySummary, RadarPoint},
    corpus::{Corpus, CorpusStats},
    geometry_summary::GeometrySummary,
    selection::SelectedDesign,
};

/// A design that could not be loaded, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureEntry {
    design: String,
    error: String,
}

/// Everything a study computed, serialized next to the charts.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    generated: String,
    corpus: CorpusStats,
    geometry: GeometrySummary,
    summary: ComplexitySummary,
    results: &'a [ComplexityResult],
    selection: &'a [SelectedDesign],
    radar: Vec<RadarPoint>,
    failures: Vec<FailureEntry>,
}

impl<'a> Report<'a> {
    /// Builds the report of a corpus and its analysis results.
    pub fn new(
        corpus: &Corpus,
        results: &'a [ComplexityResult],
        selection: &'a [SelectedDesign],
        radar: Vec<RadarPoint>,
    ) -> Self {
        Self::generated_at(Local::now(), corpus, results, selection, radar)
    }

    /// Builds a report with a fixed generation time.
    pub fn generated_at(
        generated: DateTime<Local>,
        corpus: &Corpus,
        results: &'a [ComplexityResult],
        selection: &'a [SelectedDesign],
        radar: Vec<RadarPoint>,
    ) -> Self {
        let failures = corpus
            .failures()
            .iter()
            .map(|failure| FailureEntry {
                design: failure.design().to_string(),
                error: failure.error().to_string(),
            })
            .collect();

        Self {
            generated: generated.to_rfc3339(),
            corpus: corpus.stats(),
            geometry: GeometrySummary::from_designs(corpus.designs()),
            summary: ComplexitySummary::from_results(results),
            results,
            selection,
            radar,
            failures,
        }
    }

    pub fn summary(&self) -> &ComplexitySummary {
        &self.summary
    }

    pub fn results(&self) -> &[ComplexityResult] {
        self.results
    }
}
