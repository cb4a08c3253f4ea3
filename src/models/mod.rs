// ============ Model implementations ============

pub(crate) mod distilbert;

pub use distilbert::SentimentDistilBertModel;
