use std::sync::Arc;

use crate::core::tool::{Tool, ToolDescriptor};
use crate::tools::create_event::CreateEventTool;
use crate::tools::list_events::ListEventsTool;
use crate::tools::today::TodayEventsTool;

/// Static tool catalog. Listing order is registration order.
#[derive(Clone)]
pub struct ToolRegistry {
    tools: Arc<Vec<Arc<dyn Tool>>>,
}

impl ToolRegistry {
    pub fn with_tools<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Tool>>,
    {
        let mut tools: Vec<Arc<dyn Tool>> = Vec::new();
        for t in iter {
            // Later registrations under the same name replace earlier ones.
            tools.retain(|existing| existing.name() != t.name());
            tools.push(t);
        }
        Self {
            tools: Arc::new(tools),
        }
    }

    pub fn list(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(|t| t.descriptor()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// The calendar tools: `list_events`, `get_today_events`, `create_event`.
pub fn build_registry() -> ToolRegistry {
    ToolRegistry::with_tools([
        Arc::new(ListEventsTool) as Arc<dyn Tool>,
        Arc::new(TodayEventsTool),
        Arc::new(CreateEventTool),
    ])
}
