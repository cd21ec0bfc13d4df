use ndarray::{Array1, Array2, ArrayView1, Axis};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::io::{BufRead, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};
use wordmap_common::{Result, WordmapError};

/// Largest vector width accepted from a file header
pub const MAX_DIM: usize = 1 << 16;

/// On-disk vocabulary layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VocabFormat {
    /// Binary for `.bin` files, text otherwise
    Auto,
    /// word2vec text (optional `<count> <dim>` header, GloVe files work too)
    Text,
    /// word2vec binary (little-endian f32 values)
    Binary,
}

impl VocabFormat {
    /// Pick a concrete format for `path`
    pub fn resolve(self, path: &Path) -> Self {
        match self {
            Self::Auto => {
                let is_bin = path
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("bin"))
                    .unwrap_or(false);
                if is_bin {
                    Self::Binary
                } else {
                    Self::Text
                }
            }
            other => other,
        }
    }
}

impl FromStr for VocabFormat {
    type Err = WordmapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "text" | "txt" => Ok(Self::Text),
            "binary" | "bin" => Ok(Self::Binary),
            other => Err(WordmapError::config(format!(
                "Unknown vocabulary format: {}",
                other
            ))),
        }
    }
}

/// Immutable token -> vector mapping
///
/// Rows of `vectors` follow the order in which tokens were read, which is
/// also the tie-break order for similarity ranking.
#[derive(Debug)]
pub struct EmbeddingStore {
    tokens: Vec<String>,
    index: HashMap<String, usize>,
    vectors: Array2<f32>,
    norms: Array1<f32>,
    fingerprint: Option<String>,
    source: Option<PathBuf>,
}

impl EmbeddingStore {
    /// Load a vocabulary file
    ///
    /// Any read or parse problem is reported as a load error, and the
    /// SHA-256 of the file is kept as the vocabulary fingerprint.
    pub fn load(path: &Path, format: VocabFormat) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            WordmapError::load(format!(
                "Failed to read vocabulary {}: {}",
                path.display(),
                e
            ))
        })?;
        let fingerprint = hex::encode(Sha256::digest(&bytes));

        let format = format.resolve(path);
        debug!("Parsing vocabulary {} as {:?}", path.display(), format);

        let mut store = match format {
            VocabFormat::Binary => Self::from_binary_reader(bytes.as_slice())?,
            _ => Self::from_text_reader(bytes.as_slice())?,
        };
        store.fingerprint = Some(fingerprint);
        store.source = Some(path.to_path_buf());

        info!(
            "Vocabulary loaded - {} tokens, dim {}, sha256 {}",
            store.size(),
            store.dim(),
            store.fingerprint().unwrap_or_default()
        );
        Ok(store)
    }

    /// Build a store from in-memory entries
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        let mut builder = StoreBuilder::default();
        for (position, (token, values)) in entries.into_iter().enumerate() {
            builder
                .push(token.into(), values)
                .map_err(|msg| WordmapError::load(format!("entry {}: {}", position + 1, msg)))?;
        }
        builder.finish()
    }

    /// Parse word2vec text (or header-less GloVe) data
    pub fn from_text_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut builder = StoreBuilder::default();
        let mut expected_count = None;
        let mut seen_content = false;

        for (line_idx, line) in reader.lines().enumerate() {
            let line_no = line_idx + 1;
            let line = line
                .map_err(|e| WordmapError::load(format!("line {}: {}", line_no, e)))?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if !seen_content {
                seen_content = true;
                if let Some((count, dim)) = parse_header(line) {
                    check_header_dim(dim)?;
                    builder.dim = Some(dim);
                    expected_count = Some(count);
                    continue;
                }
            }

            let mut fields = line.split_whitespace();
            let token = fields.next().unwrap_or_default().to_string();
            let values = fields
                .map(|field| {
                    field.parse::<f32>().map_err(|_| {
                        WordmapError::load(format!(
                            "line {}: '{}' is not a number",
                            line_no, field
                        ))
                    })
                })
                .collect::<Result<Vec<f32>>>()?;

            builder
                .push(token, values)
                .map_err(|msg| WordmapError::load(format!("line {}: {}", line_no, msg)))?;
        }

        if let Some(count) = expected_count {
            if builder.len() != count {
                return Err(WordmapError::load(format!(
                    "header declares {} entries, found {}",
                    count,
                    builder.len()
                )));
            }
        }

        builder.finish()
    }

    /// Parse word2vec binary data
    pub fn from_binary_reader<R: BufRead>(mut reader: R) -> Result<Self> {
        let mut header = String::new();
        reader
            .read_line(&mut header)
            .map_err(|e| WordmapError::load(format!("header: {}", e)))?;
        let (count, dim) = parse_header(header.trim())
            .ok_or_else(|| WordmapError::load("missing '<count> <dim>' header"))?;
        check_header_dim(dim)?;

        let mut builder = StoreBuilder {
            dim: Some(dim),
            ..Default::default()
        };
        let mut token_buf = Vec::new();
        let value_bytes = dim
            .checked_mul(std::mem::size_of::<f32>())
            .ok_or_else(|| WordmapError::load(format!("header dimension {} overflows", dim)))?;
        let mut value_buf = vec![0u8; value_bytes];

        for entry in 1..=count {
            token_buf.clear();
            reader
                .read_until(b' ', &mut token_buf)
                .map_err(|e| WordmapError::load(format!("entry {}: {}", entry, e)))?;
            if token_buf.pop() != Some(b' ') {
                return Err(WordmapError::load(format!(
                    "entry {}: unexpected end of file",
                    entry
                )));
            }

            // The newline closing the previous entry is optional
            let start = token_buf
                .iter()
                .position(|b| *b != b'\n')
                .unwrap_or(token_buf.len());
            let token = std::str::from_utf8(&token_buf[start..])
                .map_err(|_| WordmapError::load(format!("entry {}: token is not UTF-8", entry)))?
                .to_string();

            reader.read_exact(&mut value_buf).map_err(|_| {
                WordmapError::load(format!("entry {}: truncated vector for '{}'", entry, token))
            })?;
            let values = value_buf
                .chunks_exact(4)
                .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                .collect();

            builder
                .push(token, values)
                .map_err(|msg| WordmapError::load(format!("entry {}: {}", entry, msg)))?;
        }

        builder.finish()
    }

    /// Exact, case-sensitive membership
    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    /// Row index of a token
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// Vector for a token
    pub fn vector_of(&self, token: &str) -> Result<ArrayView1<'_, f32>> {
        self.index_of(token)
            .map(|idx| self.vectors.row(idx))
            .ok_or_else(|| WordmapError::unknown_token(token))
    }

    /// Stack the vectors of `tokens` into a matrix, one row per token
    pub fn rows_of(&self, tokens: &[&str]) -> Result<Array2<f32>> {
        let indices = tokens
            .iter()
            .map(|t| self.index_of(t).ok_or_else(|| WordmapError::unknown_token(*t)))
            .collect::<Result<Vec<usize>>>()?;
        Ok(self.vectors.select(Axis(0), &indices))
    }

    /// Vocabulary cardinality
    pub fn size(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Vector dimensionality
    pub fn dim(&self) -> usize {
        self.vectors.ncols()
    }

    /// Tokens in load order
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// SHA-256 of the source file, if loaded from disk
    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    /// Source file, if loaded from disk
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub(crate) fn vectors(&self) -> &Array2<f32> {
        &self.vectors
    }

    pub(crate) fn norms(&self) -> &Array1<f32> {
        &self.norms
    }
}

fn check_header_dim(dim: usize) -> Result<()> {
    if dim == 0 {
        return Err(WordmapError::load("header declares zero dimensions"));
    }
    if dim > MAX_DIM {
        return Err(WordmapError::load(format!(
            "header declares {} dimensions, at most {} supported",
            dim, MAX_DIM
        )));
    }
    Ok(())
}

/// `<count> <dim>` header line
fn parse_header(line: &str) -> Option<(usize, usize)> {
    let mut fields = line.split_whitespace();
    let count = fields.next()?.parse().ok()?;
    let dim = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some((count, dim))
}

#[derive(Default)]
struct StoreBuilder {
    dim: Option<usize>,
    tokens: Vec<String>,
    index: HashMap<String, usize>,
    data: Vec<f32>,
}

impl StoreBuilder {
    fn len(&self) -> usize {
        self.tokens.len()
    }

    fn push(&mut self, token: String, values: Vec<f32>) -> std::result::Result<(), String> {
        if token.is_empty() {
            return Err("empty token".to_string());
        }
        if values.is_empty() {
            return Err(format!("token '{}' has no vector values", token));
        }
        match self.dim {
            Some(dim) if dim != values.len() => {
                return Err(format!(
                    "token '{}' has {} values, expected {}",
                    token,
                    values.len(),
                    dim
                ));
            }
            None => self.dim = Some(values.len()),
            _ => {}
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(format!("token '{}' has a non-finite value", token));
        }
        if self.index.contains_key(&token) {
            return Err(format!("duplicate token '{}'", token));
        }

        self.index.insert(token.clone(), self.tokens.len());
        self.tokens.push(token);
        self.data.extend_from_slice(&values);
        Ok(())
    }

    fn finish(self) -> Result<EmbeddingStore> {
        let dim = match self.dim {
            Some(dim) if !self.tokens.is_empty() => dim,
            _ => return Err(WordmapError::load("vocabulary is empty")),
        };

        let vectors = Array2::from_shape_vec((self.tokens.len(), dim), self.data)
            .map_err(|e| WordmapError::load(format!("vector matrix: {}", e)))?;
        let norms = vectors.map_axis(Axis(1), |row| row.dot(&row).sqrt());

        Ok(EmbeddingStore {
            tokens: self.tokens,
            index: self.index,
            vectors,
            norms,
            fingerprint: None,
            source: None,
        })
    }
}
