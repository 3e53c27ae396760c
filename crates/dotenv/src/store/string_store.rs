//! Store over content that is already in memory.

use async_trait::async_trait;

use super::Store;
use crate::error::Result;

/// Store that returns a fixed string, used to parse content without touching disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringStore {
    content: String,
}

impl StringStore {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

#[async_trait]
impl Store for StringStore {
    async fn read(&self) -> Result<String> {
        Ok(self.content.clone())
    }
}
