//! Date-stamped output files.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDate};
use log::{debug, error, info};

use super::{Error, Exporter, raster::Rasterizer, report::Report};
use crate::config::ImageFormat;

/// Output directory that names files `YYYY-MM-DD_<name>.<ext>`.
///
/// The directory is created on the first write. Without date stamping files
/// are named `<name>.<ext>`. Charts are written once per configured format,
/// SVG only by default.
#[derive(Debug)]
pub struct OutputDir {
    dir: PathBuf,
    date_stamp: bool,
    date: NaiveDate,
    formats: Vec<ImageFormat>,
    rasterizer: Option<Rasterizer>,
    written: Vec<PathBuf>,
}

impl OutputDir {
    /// Creates an output directory stamped with today's local date.
    pub fn new(dir: impl Into<PathBuf>, date_stamp: bool) -> Self {
        Self {
            dir: dir.into(),
            date_stamp,
            date: Local::now().date_naive(),
            formats: vec![ImageFormat::Svg],
            rasterizer: None,
            written: Vec::new(),
        }
    }

    /// Writes charts in `formats`, rasterizing at `raster_scale` pixels per
    /// chart unit.
    pub fn with_formats(mut self, formats: &[ImageFormat], raster_scale: f32) -> Self {
        self.formats = formats.to_vec();
        self.rasterizer = formats
            .contains(&ImageFormat::Png)
            .then(|| Rasterizer::new(raster_scale));
        self
    }

    /// Overrides the stamp date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far, in write order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Path a file called `name` with `extension` is written to.
    pub fn file_path(&self, name: &str, extension: &str) -> PathBuf {
        let file_name = if self.date_stamp {
            format!("{}_{name}.{extension}", self.date.format("%Y-%m-%d"))
        } else {
            format!("{name}.{extension}")
        };
        self.dir.join(file_name)
    }

    fn write_file(&mut self, path: PathBuf, contents: &[u8]) -> Result<PathBuf, Error> {
        if !self.dir.is_dir() {
            debug!(dir:? = self.dir; "Creating output directory");
            if let Err(err) = fs::create_dir_all(&self.dir) {
                error!(dir:? = self.dir, err:err; "Failed to create output directory");
                return Err(Error::Io(err));
            }
        }

        let mut file = match File::create(&path) {
            Ok(file) => file,
            Err(err) => {
                error!(file_name:? = path, err:err; "Failed to create output file");
                return Err(Error::Io(err));
            }
        };

        if let Err(err) = file.write_all(contents) {
            error!(file_name:? = path, err:err; "Failed to write output file");
            return Err(Error::Io(err));
        }

        self.written.push(path.clone());
        Ok(path)
    }
}

impl Exporter for OutputDir {
    fn export_chart(
        &mut self,
        name: &str,
        document: &::svg::Document,
    ) -> Result<Vec<PathBuf>, Error> {
        let mut paths = Vec::with_capacity(self.formats.len());
        for format in self.formats.clone() {
            let path = self.file_path(name, format.extension());
            let contents = match (format, &self.rasterizer) {
                (ImageFormat::Svg, _) => {
                    info!(file_name:? = path; "Creating SVG file");
                    document.to_string().into_bytes()
                }
                (ImageFormat::Png, Some(rasterizer)) => {
                    info!(file_name:? = path; "Creating PNG file");
                    rasterizer.render_png(document)?
                }
                (ImageFormat::Png, None) => {
                    return Err(Error::Render("PNG output has no rasterizer".to_string()));
                }
            };
            paths.push(self.write_file(path, &contents)?);
        }
        Ok(paths)
    }

    fn export_report(&mut self, name: &str, report: &Report<'_>) -> Result<PathBuf, Error> {
        let json = serde_json::to_string_pretty(report)
            .map_err(|err| Error::Render(format!("failed to serialize report: {err}")))?;

        let path = self.file_path(name, "json");
        info!(file_name:? = path; "Creating report file");
        self.write_file(path, json.as_bytes())
    }
}
