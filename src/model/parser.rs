//! ObjectiveParser：一次调用完成构建与加载，并保留最近一次的结果

use std::path::Path;

use crate::model::graph::{DocumentGraph, GraphError};

#[derive(Debug, Default)]
pub struct ObjectiveParser {
    data: Option<DocumentGraph>,
}

impl ObjectiveParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加载失败时保留上一次成功的结果
    pub fn parse(&mut self, path: impl AsRef<Path>) -> Result<&mut DocumentGraph, GraphError> {
        let mut graph = DocumentGraph::new();
        graph.load(path)?;
        Ok(self.data.insert(graph))
    }

    pub fn data(&self) -> Option<&DocumentGraph> {
        self.data.as_ref()
    }

    pub fn data_mut(&mut self) -> Option<&mut DocumentGraph> {
        self.data.as_mut()
    }
}
