use crc32fast::Hasher;
use std::collections::HashSet;

/// Generate a document seed from its path using CRC32
pub fn get_document_id(path: &str) -> String {
    let mut buff = String::from(path);
    if !path.starts_with("file://") {
        buff = format!("file://{}", buff);
    }

    let mut hasher = Hasher::new();
    hasher.update(buff.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential identifier generator for rows, cells and blocks of one document
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(path: &str) -> Self {
        Self {
            seed: get_document_id(path),
            count: 0,
        }
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Next sequential id
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    /// Next sequential id not contained in `taken`
    pub fn fresh(&mut self, taken: &HashSet<String>) -> String {
        loop {
            let id = self.new_id();
            if !taken.contains(&id) {
                return id;
            }
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_stable_per_path() {
        assert_eq!(get_document_id("/lesson.json"), get_document_id("/lesson.json"));
        assert_ne!(get_document_id("/lesson.json"), get_document_id("/quiz.json"));
    }

    #[test]
    fn test_sequential_ids() {
        let mut ids = IdGenerator::from_seed("doc");
        assert_eq!(ids.new_id(), "doc-1");
        assert_eq!(ids.new_id(), "doc-2");
    }

    #[test]
    fn test_fresh_skips_taken_ids() {
        let mut ids = IdGenerator::from_seed("doc");
        let taken: HashSet<String> = ["doc-1".to_string(), "doc-2".to_string()].into();
        assert_eq!(ids.fresh(&taken), "doc-3");
    }
}
