pub mod chat;
pub mod credentials;
pub mod log;

#[cfg(test)]
pub(crate) mod testing {
    use crate::console::Console;
    use jobchat::domain::config::AppConfig;
    use jobchat::features::assistant::{ChatSession, ScriptedProvider};
    use jobchat::storage::MemoryStore;
    use jobchat::{Components, SharedStore};
    use std::sync::Arc;

    pub(crate) fn components() -> Components {
        let store: SharedStore = Arc::new(MemoryStore::new());
        Components::from_config(&AppConfig::default(), store, "shell-test").unwrap()
    }

    pub(crate) fn session(components: &Components, provider: ScriptedProvider) -> ChatSession<ScriptedProvider> {
        components.session(provider)
    }

    pub(crate) fn console(input: &'static str) -> Console<&'static [u8], Vec<u8>> {
        Console::new(input.as_bytes(), Vec::new())
    }

    pub(crate) fn output(console: Console<&'static [u8], Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }
}
