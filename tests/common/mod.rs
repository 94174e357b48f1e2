#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use envtemplate::environment::EnvironmentAccessor;

/// Fixed set of environment variables.
#[derive(Default)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
}

impl MapEnvironment {
    pub fn new(vars: &[(&str, &str)]) -> Arc<dyn EnvironmentAccessor> {
        let vars = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Arc::new(Self { vars })
    }

    pub fn empty() -> Arc<dyn EnvironmentAccessor> {
        Arc::new(Self::default())
    }
}

impl EnvironmentAccessor for MapEnvironment {
    fn lookup(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}
