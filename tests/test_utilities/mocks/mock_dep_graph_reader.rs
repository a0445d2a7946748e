use std::path::Path;
use depgraph_sbom::prelude::*;

/// Mock DepGraphReader for testing
pub struct MockDepGraphReader {
    pub graph: serde_json::Value,
    pub should_fail: bool,
}

impl MockDepGraphReader {
    pub fn new(graph: serde_json::Value) -> Self {
        Self {
            graph,
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            graph: serde_json::Value::Null,
            should_fail: true,
        }
    }
}

impl DepGraphReader for MockDepGraphReader {
    fn read_dep_graph(&self, _path: &Path) -> Result<serde_json::Value> {
        if self.should_fail {
            anyhow::bail!("Mock dependency graph read failure");
        }
        Ok(self.graph.clone())
    }
}
