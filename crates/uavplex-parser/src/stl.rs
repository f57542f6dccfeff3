//! STL mesh reader.
//!
//! Both encodings are accepted. A file is binary when its length matches the
//! triangle count in its header exactly; otherwise a file starting with
//! `solid` is read as ASCII. Binary headers may also start with `solid`, so
//! the length check comes first.

use log::debug;
use uavplex_core::{
    geometry::Point3,
    mesh::{Mesh, Triangle},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError, Result},
    span::Span,
};

const HEADER_LEN: usize = 80;
const COUNT_LEN: usize = 4;
const RECORD_LEN: usize = 50;

/// Parses an STL file into a triangle mesh.
///
/// # Errors
///
/// Truncated binary files fail with `E300`. ASCII files report every
/// malformed facet (`E301`) and unparsable number (`E302`).
pub fn parse_stl(bytes: &[u8]) -> std::result::Result<Mesh, ParseError> {
    let mesh = if let Some(count) = binary_triangle_count(bytes) {
        parse_binary(bytes, count)
    } else if bytes.trim_ascii_start().starts_with(b"solid") {
        parse_ascii(&String::from_utf8_lossy(bytes))?
    } else {
        return Err(truncated(bytes).into());
    };

    debug!(triangles = mesh.len(); "STL mesh parsed");
    Ok(mesh)
}

/// Triangle count of a well-formed binary file.
fn binary_triangle_count(bytes: &[u8]) -> Option<usize> {
    let count = bytes.get(HEADER_LEN..HEADER_LEN + COUNT_LEN)?;
    let count = u32::from_le_bytes(count.try_into().ok()?) as usize;
    let expected = HEADER_LEN + COUNT_LEN + count.checked_mul(RECORD_LEN)?;
    (bytes.len() == expected).then_some(count)
}

fn truncated(bytes: &[u8]) -> Diagnostic {
    let declared = bytes
        .get(HEADER_LEN..HEADER_LEN + COUNT_LEN)
        .and_then(|count| count.try_into().ok())
        .map(u32::from_le_bytes);
    let message = match declared {
        Some(count) => format!(
            "binary STL declares {count} triangles but has {} bytes",
            bytes.len()
        ),
        None => format!("STL file is only {} bytes long", bytes.len()),
    };
    Diagnostic::error(message)
        .with_code(ErrorCode::E300)
        .with_help("re-export the mesh; the file looks cut short")
}

fn parse_binary(bytes: &[u8], count: usize) -> Mesh {
    let records = &bytes[HEADER_LEN + COUNT_LEN..];
    let triangles = records
        .chunks_exact(RECORD_LEN)
        .take(count)
        .map(|record| {
            // 12 bytes of normal, then three vertices, then 2 attribute bytes
            let vertex = |i: usize| {
                let base = 12 + i * 12;
                Point3::new(
                    read_f32(record, base),
                    read_f32(record, base + 4),
                    read_f32(record, base + 8),
                )
            };
            Triangle::new(vertex(0), vertex(1), vertex(2))
        })
        .collect();
    Mesh::new(triangles)
}

fn read_f32(record: &[u8], offset: usize) -> f32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&record[offset..offset + 4]);
    f32::from_le_bytes(raw)
}

fn parse_ascii(source: &str) -> std::result::Result<Mesh, ParseError> {
    let mut collector = DiagnosticCollector::new();
    let mut triangles = Vec::new();
    let mut facet: Vec<Point3> = Vec::with_capacity(3);
    let mut facet_start = Span::default();

    let mut tokens = tokens(source);
    while let Some((span, token)) = tokens.next() {
        match token {
            "facet" => {
                facet.clear();
                facet_start = span;
            }
            "vertex" => match read_vertex(&mut tokens, span) {
                Ok(point) => facet.push(point),
                Err(diag) => collector.emit(diag),
            },
            "endfacet" => {
                if let [a, b, c] = facet[..] {
                    triangles.push(Triangle::new(a, b, c));
                } else {
                    collector.emit(
                        Diagnostic::error(format!(
                            "facet has {} vertices, expected 3",
                            facet.len()
                        ))
                        .with_code(ErrorCode::E301)
                        .with_label(facet_start, "facet starts here"),
                    );
                }
                facet.clear();
            }
            _ => {}
        }
    }

    collector.finish()?;
    Ok(Mesh::new(triangles))
}

fn read_vertex<'a>(
    tokens: &mut impl Iterator<Item = (Span, &'a str)>,
    vertex_span: Span,
) -> Result<Point3> {
    let mut coords = [0.0f32; 3];
    for coord in &mut coords {
        let Some((span, token)) = tokens.next() else {
            return Err(Diagnostic::error("vertex has fewer than three coordinates")
                .with_code(ErrorCode::E301)
                .with_label(vertex_span, "incomplete vertex"));
        };
        *coord = token.parse().map_err(|_| {
            Diagnostic::error(format!("`{token}` is not a number"))
                .with_code(ErrorCode::E302)
                .with_label(span, "expected a coordinate")
        })?;
    }
    Ok(Point3::new(coords[0], coords[1], coords[2]))
}

/// Whitespace-separated tokens with their byte spans.
fn tokens(source: &str) -> impl Iterator<Item = (Span, &str)> {
    source.split_ascii_whitespace().map(move |token| {
        let start = token.as_ptr() as usize - source.as_ptr() as usize;
        (Span::new(start..start + token.len()), token)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TETRA_FACE: &str = "solid part
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
endsolid part
";

    fn binary(triangles: &[[f32; 9]]) -> Vec<u8> {
        let mut bytes = vec![0u8; HEADER_LEN];
        bytes[..5].copy_from_slice(b"solid");
        bytes.extend_from_slice(&(triangles.len() as u32).to_le_bytes());
        for triangle in triangles {
            bytes.extend_from_slice(&[0u8; 12]);
            for value in triangle {
                bytes.extend_from_slice(&value.to_le_bytes());
            }
            bytes.extend_from_slice(&[0u8; 2]);
        }
        bytes
    }

    #[test]
    fn test_ascii_single_facet() {
        let mesh = parse_stl(TETRA_FACE.as_bytes()).unwrap();
        assert_eq!(mesh.len(), 1);
        assert_eq!(mesh.triangles()[0].vertices()[1], Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_binary_with_solid_header() {
        let bytes = binary(&[
            [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 2.5],
        ]);
        let mesh = parse_stl(&bytes).unwrap();
        assert_eq!(mesh.len(), 2);
        assert_eq!(mesh.triangles()[1].vertices()[2].z(), 2.5);
    }

    #[test]
    fn test_binary_truncated() {
        let mut bytes = binary(&[[0.0; 9]]);
        bytes.truncate(bytes.len() - 10);
        bytes[0] = b'x';
        let err = parse_stl(&bytes).unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E300));
    }

    #[test]
    fn test_ascii_bad_facet_and_number() {
        let source = "solid broken
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
    endloop
  endfacet
  facet normal 0 0 1
    outer loop
      vertex 0 zero 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
endsolid
";
        let err = parse_stl(source.as_bytes()).unwrap_err();
        let codes: Vec<_> = err.diagnostics().iter().filter_map(|d| d.code()).collect();
        assert!(codes.contains(&ErrorCode::E301));
        assert!(codes.contains(&ErrorCode::E302));

        let bad = err
            .diagnostics()
            .iter()
            .find(|d| d.code() == Some(ErrorCode::E302))
            .unwrap();
        let span = bad.labels()[0].span();
        assert_eq!(&source[span.start()..span.end()], "zero");
    }

    #[test]
    fn test_empty_ascii_solid() {
        let mesh = parse_stl(b"solid empty\nendsolid empty\n").unwrap();
        assert!(mesh.is_empty());
    }
}
