pub mod dictionary;
pub mod explainer;
pub mod http;

#[cfg(test)]
mod test_server;

pub use dictionary::FreeDictionaryClient;
pub use explainer::OpenAiExplainer;
pub use http::build_client;
