//! STL reader for both binary and ASCII files.
//!
//! Binary layout: 80-byte header, little-endian `u32` triangle count, then
//! 50 bytes per triangle (normal, three vertices as `f32` triples, and a
//! `u16` attribute word).  A file is treated as binary whenever its size
//! matches the announced count, since binary headers may begin with
//! `solid` too.

use glam::Vec3;

use crate::error::MeshError;
use crate::mesh::Triangle;

const HEADER_LEN:   usize = 80;
const RECORD_LEN:   usize = 50;
const PREAMBLE_LEN: usize = HEADER_LEN + 4;

/// Parse STL bytes into triangles.
pub fn parse(bytes: &[u8]) -> Result<Vec<Triangle>, MeshError> {
    if let Some(count) = binary_count(bytes) {
        if PREAMBLE_LEN + count * RECORD_LEN == bytes.len() {
            return Ok(parse_binary(bytes, count));
        }
    }
    if looks_ascii(bytes) {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| MeshError::Parse(format!("not UTF-8: {}", e)))?;
        return parse_ascii(text);
    }
    match binary_count(bytes) {
        Some(expected) => Err(MeshError::Truncated {
            expected,
            found: (bytes.len() - PREAMBLE_LEN) / RECORD_LEN,
        }),
        None => Err(MeshError::UnknownFormat(bytes.len())),
    }
}

fn binary_count(bytes: &[u8]) -> Option<usize> {
    let raw: [u8; 4] = bytes.get(HEADER_LEN..PREAMBLE_LEN)?.try_into().ok()?;
    Some(u32::from_le_bytes(raw) as usize)
}

fn looks_ascii(bytes: &[u8]) -> bool {
    let start = bytes.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(bytes.len());
    bytes[start..]
        .get(..5)
        .map_or(false, |w| w.eq_ignore_ascii_case(b"solid"))
}

// ════════════════════════════════════════════════════════════════════════════
// Binary
// ════════════════════════════════════════════════════════════════════════════

fn parse_binary(bytes: &[u8], count: usize) -> Vec<Triangle> {
    let read_vec = |rec: &[u8], at: usize| {
        let f = |i: usize| {
            let o = at + i * 4;
            f32::from_le_bytes([rec[o], rec[o + 1], rec[o + 2], rec[o + 3]])
        };
        Vec3::new(f(0), f(1), f(2))
    };

    bytes[PREAMBLE_LEN..]
        .chunks_exact(RECORD_LEN)
        .take(count)
        .map(|rec| {
            Triangle::new(
                read_vec(rec, 0),
                [read_vec(rec, 12), read_vec(rec, 24), read_vec(rec, 36)],
            )
        })
        .collect()
}

// ════════════════════════════════════════════════════════════════════════════
// ASCII
// ════════════════════════════════════════════════════════════════════════════

struct Tokens<'a> {
    inner: std::str::SplitAsciiWhitespace<'a>,
    facet: usize,
}

impl<'a> Tokens<'a> {
    fn next(&mut self) -> Option<&'a str> {
        self.inner.next()
    }

    fn expect(&mut self, word: &str) -> Result<(), MeshError> {
        match self.next() {
            Some(t) if t.eq_ignore_ascii_case(word) => Ok(()),
            Some(t) => Err(self.error(format!("expected `{}`, found `{}`", word, t))),
            None    => Err(self.error(format!("expected `{}`, found end of file", word))),
        }
    }

    fn vec3(&mut self) -> Result<Vec3, MeshError> {
        let mut xyz = [0.0f32; 3];
        for slot in &mut xyz {
            let tok = self.next().ok_or_else(|| self.error("missing coordinate".to_string()))?;
            *slot = tok
                .parse()
                .map_err(|_| self.error(format!("bad number `{}`", tok)))?;
        }
        Ok(Vec3::from_array(xyz))
    }

    fn error(&self, msg: String) -> MeshError {
        MeshError::Parse(format!("facet {}: {}", self.facet, msg))
    }
}

fn parse_ascii(text: &str) -> Result<Vec<Triangle>, MeshError> {
    let mut tok = Tokens { inner: text.split_ascii_whitespace(), facet: 0 };
    tok.expect("solid")?;

    let mut triangles = Vec::new();
    // Anything between `solid` and the first `facet` is the solid's name.
    while let Some(word) = tok.next() {
        if word.eq_ignore_ascii_case("endsolid") {
            return Ok(triangles);
        }
        if !word.eq_ignore_ascii_case("facet") {
            if triangles.is_empty() {
                continue;
            }
            return Err(tok.error(format!("expected `facet`, found `{}`", word)));
        }

        tok.expect("normal")?;
        let normal = tok.vec3()?;
        tok.expect("outer")?;
        tok.expect("loop")?;
        let mut vertices = [Vec3::ZERO; 3];
        for v in &mut vertices {
            tok.expect("vertex")?;
            *v = tok.vec3()?;
        }
        tok.expect("endloop")?;
        tok.expect("endfacet")?;

        triangles.push(Triangle::new(normal, vertices));
        tok.facet += 1;
    }

    Err(tok.error("missing `endsolid`".to_string()))
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    const ASCII_TWO: &str = "\
solid two triangles
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
  facet normal 0 0 0
    outer loop
      vertex 1 0 0
      vertex 1 1 0
      vertex 0 1 0
    endloop
  endfacet
endsolid two triangles
";

    fn binary(header: &[u8], tris: &[[f32; 12]]) -> Vec<u8> {
        let mut out = vec![0u8; HEADER_LEN];
        out[..header.len()].copy_from_slice(header);
        out.extend_from_slice(&(tris.len() as u32).to_le_bytes());
        for t in tris {
            for f in t {
                out.extend_from_slice(&f.to_le_bytes());
            }
            out.extend_from_slice(&0u16.to_le_bytes());
        }
        out
    }

    fn binary_two(header: &[u8]) -> Vec<u8> {
        binary(header, &[
            [0., 0., 1.,  0., 0., 0.,  1., 0., 0.,  0., 1., 0.],
            [0., 0., 0.,  1., 0., 0.,  1., 1., 0.,  0., 1., 0.],
        ])
    }

    #[test]
    fn ascii_and_binary_agree() {
        let a = parse(ASCII_TWO.as_bytes()).unwrap();
        let b = parse(&binary_two(b"exported by a CAD tool")).unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(a, b);
        // Second facet had a zero normal: derived from winding.
        assert_eq!(a[1].normal, Vec3::Z);
    }

    #[test]
    fn binary_header_starting_with_solid() {
        let tris = parse(&binary_two(b"solid but actually binary")).unwrap();
        assert_eq!(tris.len(), 2);
    }

    #[test]
    fn truncated_binary_rejected() {
        let mut bytes = binary_two(b"binary");
        bytes.truncate(bytes.len() - 10);
        match parse(&bytes) {
            Err(MeshError::Truncated { expected, found }) => {
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("expected truncation error, got {:?}", other),
        }
    }

    #[test]
    fn garbage_rejected() {
        assert!(matches!(parse(b"hello"), Err(MeshError::UnknownFormat(5))));
    }

    #[test]
    fn ascii_missing_vertex_reports_facet() {
        let broken = "solid x\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\nvertex 1 0 0\nendloop\nendfacet\nendsolid x\n";
        let err = parse(broken.as_bytes()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("facet 0"), "{}", msg);
        assert!(msg.contains("vertex"), "{}", msg);
    }

    #[test]
    fn ascii_without_endsolid_rejected() {
        let text = ASCII_TWO.replace("endsolid two triangles", "");
        assert!(matches!(parse(text.as_bytes()), Err(MeshError::Parse(_))));
    }

    #[test]
    fn ascii_is_case_insensitive_and_accepts_exponents() {
        let text = "SOLID\nFACET NORMAL 0 0 1\nOUTER LOOP\nVERTEX 0 0 0\nVERTEX 1e0 0 0\nVERTEX 0 1.0E+00 0\nENDLOOP\nENDFACET\nENDSOLID\n";
        let tris = parse(text.as_bytes()).unwrap();
        assert_eq!(tris[0].vertices[2], Vec3::Y);
    }
}
