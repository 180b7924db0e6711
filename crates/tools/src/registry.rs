use crate::traits::Capability;
use std::collections::HashMap;
use std::sync::Arc;

/// Capability name to handler lookup.
pub struct CapabilityRegistry {
    capabilities: HashMap<String, Arc<dyn Capability>>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self {
            capabilities: HashMap::new(),
        }
    }

    /// Registers under the capability's lowercase name, replacing any previous handler.
    pub fn register(&mut self, capability: Arc<dyn Capability>) {
        let name = capability.name().trim().to_lowercase();
        if self.capabilities.insert(name.clone(), capability).is_some() {
            tracing::debug!("Replaced capability handler: {}", name);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Capability>> {
        self.capabilities.get(name).cloned()
    }

    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.capabilities.keys().cloned().collect();
        names.sort();
        names
    }

    /// One `- "name": description` line per capability, sorted by name.
    pub fn describe(&self) -> String {
        self.list()
            .iter()
            .filter_map(|name| {
                let capability = self.capabilities.get(name)?;
                Some(format!("- \"{}\": {}", name, capability.description()))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
