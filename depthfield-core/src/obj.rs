/// Wavefront OBJ reader for vertex and triangle records
use std::fs;
use std::path::Path;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till},
    character::complete::{digit1, space1},
    combinator::{eof, map_res, opt, peek, rest, verify},
    number::complete::double,
    sequence::{pair, preceded, tuple},
    IResult,
};

use crate::error::ParseError;
use crate::geometry::{Face, Mesh};

/// One recognized line of an OBJ file
#[derive(Debug, Clone, Copy, PartialEq)]
enum Record {
    Vertex(f64, f64, f64),
    /// 1-based indices as written in the file
    Face(usize, usize, usize),
}

/// Read and parse an OBJ file from disk.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, ParseError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mesh = parse_obj(&text)?;
    log::debug!(
        "loaded {}: {} vertices, {} faces",
        path.display(),
        mesh.vertices.len(),
        mesh.faces.len()
    );
    Ok(mesh)
}

/// Parse OBJ text into a mesh.
///
/// Only `v` and `f` records are read. Faces with more than three corners are
/// truncated to their first three. Face indices are checked against the
/// vertex count once the whole text has been read, so faces may refer to
/// vertices declared after them.
pub fn parse_obj(input: &str) -> Result<Mesh, ParseError> {
    let mut mesh = Mesh::new();
    // (line, 1-based indices) for the deferred range check
    let mut pending = Vec::new();

    for (number, line) in input.lines().enumerate() {
        let number = number + 1;
        match parse_line(line.trim(), number)? {
            Some(Record::Vertex(x, y, z)) => {
                mesh.add_vertex(x, y, z);
            }
            Some(Record::Face(a, b, c)) => pending.push((number, [a, b, c])),
            None => {}
        }
    }

    let count = mesh.vertices.len();
    for (line, indices) in pending {
        if let Some(&index) = indices.iter().find(|&&index| index > count) {
            return Err(ParseError::IndexOutOfRange { line, index, count });
        }
        mesh.add_face(Face::new(indices[0] - 1, indices[1] - 1, indices[2] - 1));
    }

    Ok(mesh)
}

fn parse_line(line: &str, number: usize) -> Result<Option<Record>, ParseError> {
    let keyword = line.split_whitespace().next().unwrap_or_default();
    let parsed = match keyword {
        "v" => vertex_record(line),
        "f" => face_record(line),
        _ => return Ok(None),
    };

    match parsed {
        Ok((_, record)) => Ok(Some(record)),
        Err(_) => Err(ParseError::malformed(
            number,
            format!("malformed '{keyword}' record: {line}"),
        )),
    }
}

fn vertex_record(input: &str) -> IResult<&str, Record> {
    let (input, _) = tag("v")(input)?;
    let (input, (x, y, z)) = tuple((
        preceded(space1, coordinate),
        preceded(space1, coordinate),
        preceded(space1, coordinate),
    ))(input)?;
    // Anything after z (a w component, trailing comment) is ignored, but z
    // itself must end at a field boundary.
    let (input, _) = opt(pair(space1, rest))(input)?;
    let (input, _) = eof(input)?;
    Ok((input, Record::Vertex(x, y, z)))
}

/// A finite number; `nan` and `inf` are rejected.
fn coordinate(input: &str) -> IResult<&str, f64> {
    verify(double, |value: &f64| value.is_finite())(input)
}

fn face_record(input: &str) -> IResult<&str, Record> {
    let (input, _) = tag("f")(input)?;
    let (input, (a, b, c)) = tuple((
        preceded(space1, face_index),
        preceded(space1, face_index),
        preceded(space1, face_index),
    ))(input)?;
    let (input, _) = rest(input)?;
    Ok((input, Record::Face(a, b, c)))
}

/// A vertex reference `i`, `i/t`, `i//n` or `i/t/n`, keeping only `i`.
fn face_index(input: &str) -> IResult<&str, usize> {
    let (input, index) = map_res(digit1, parse_index)(input)?;
    let (input, _) = opt(preceded(tag("/"), take_till(char::is_whitespace)))(input)?;
    // The token must end here; `12a` is not an index.
    let (input, _) = peek(alt((space1, eof)))(input)?;
    Ok((input, index))
}

fn parse_index(digits: &str) -> Result<usize, &'static str> {
    match digits.parse::<usize>() {
        Ok(0) => Err("vertex indices start at 1"),
        Ok(index) => Ok(index),
        Err(_) => Err("vertex index out of range"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    const TRIANGLE: &str = "\
# a single triangle
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
vn 0.0 0.0 1.0
f 1/1 2/1 3/1
";

    #[test]
    fn test_parse_triangle() {
        let mesh = parse_obj(TRIANGLE).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.vertices[1], Point3::new(1.0, 0.0, 0.0));
        assert_eq!(mesh.faces, vec![Face::new(0, 1, 2)]);
    }

    #[test]
    fn test_face_token_forms() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\nf 1//1 2//1 3//1\nf 3/1/1 2/2/2 1/3/3\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(
            mesh.faces,
            vec![Face::new(0, 1, 2), Face::new(0, 1, 2), Face::new(2, 1, 0)]
        );
    }

    #[test]
    fn test_quad_is_truncated() {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1/1 2/1 3/1 4/1\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.faces, vec![Face::new(0, 1, 2)]);
    }

    #[test]
    fn test_forward_references() {
        let text = "f 1/1 2/1 3/1\nv 0 0 0\nv 1 0 0\nv 0 1 0\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.faces.len(), 1);
    }

    #[test]
    fn test_ignores_other_records() {
        let text = "o cube\ng side\ns off\nusemtl red\nvt 0.5 0.5\n\nv 1 2 3\nv 4 5 6 1.0\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(
            mesh.vertices,
            vec![Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 5.0, 6.0)]
        );
        assert!(mesh.faces.is_empty());
    }

    #[test]
    fn test_malformed_vertex() {
        let err = parse_obj("v 1.0 abc 2.0\n").unwrap_err();
        assert!(matches!(err, ParseError::Malformed { line: 1, .. }), "{err}");

        let err = parse_obj("v 0 0 0\nv 1.0 2.0\n").unwrap_err();
        assert!(matches!(err, ParseError::Malformed { line: 2, .. }), "{err}");
    }

    #[test]
    fn test_non_finite_vertex() {
        for text in ["v nan 0 0\n", "v 0 inf 0\n", "v 0 0 INF\n"] {
            let err = parse_obj(text).unwrap_err();
            assert!(matches!(err, ParseError::Malformed { line: 1, .. }), "{text}: {err}");
        }
    }

    #[test]
    fn test_malformed_face() {
        for text in ["f 1 2\n", "f a/1 b/1 c/1\n", "f 0 1 2\n", "f -1 -2 -3\n"] {
            let err = parse_obj(text).unwrap_err();
            assert!(matches!(err, ParseError::Malformed { line: 1, .. }), "{text}: {err}");
        }
    }

    #[test]
    fn test_index_out_of_range() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nf 1 2 3\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::IndexOutOfRange {
                line: 3,
                index: 3,
                count: 2
            }
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_obj("/nonexistent/model.obj").unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
    }
}
