use crate::application::history::HistoryStore;
use crate::domain::error::AppError;
use crate::domain::traits::{KvStore, SpeechSynthesizer, Translator};
use crate::infrastructure::config::Config;
use crate::infrastructure::network::client::MyMemoryClient;
use crate::infrastructure::network::http::create_client;
use crate::infrastructure::network::rate_limit::RateLimiter;
use crate::infrastructure::speech::EspeakSynthesizer;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub translator: Arc<dyn Translator>,
    pub history: HistoryStore,
    pub speech: Arc<dyn SpeechSynthesizer>,
}

impl AppState {
    /// Wire the real MyMemory client and espeak backend around `store`
    pub fn new(config: Config, store: Arc<dyn KvStore>) -> Result<Self, AppError> {
        let http_client = create_client(&config)?;
        let limiter = Arc::new(RateLimiter::from_millis(
            config.translate.min_request_delay_ms,
        ));
        let translator = Arc::new(MyMemoryClient::new(
            http_client,
            &config.translate,
            limiter,
        ));
        let speech = Arc::new(EspeakSynthesizer::new(config.speech.command.clone()));

        Ok(Self::from_parts(config, translator, store, speech))
    }

    pub fn from_parts(
        config: Config,
        translator: Arc<dyn Translator>,
        store: Arc<dyn KvStore>,
        speech: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        let history = HistoryStore::new(
            store,
            config.history.storage_key.clone(),
            config.history.max_items,
        );

        Self {
            config: Arc::new(config),
            translator,
            history,
            speech,
        }
    }
}
