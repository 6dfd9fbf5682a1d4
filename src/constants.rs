/// Constants shared by the value listifier.
pub mod listify {
    /// End-of-utterance token separating turns in single-string dialogues.
    pub const EOU_DELIMITER: &str = "__eou__";
}

/// Candidate field names for multi-turn dialogue datasets, in priority order.
pub mod dialogue {
    /// Fields that may carry the utterance sequence.
    pub const CONVERSATION_FIELDS: &[&str] =
        &["dialog", "dialogue", "utterances", "conversation", "text"];
    /// Fields that may carry per-turn intent (dialogue act) labels.
    pub const INTENT_FIELDS: &[&str] = &["intent", "intention", "act"];
    /// Fields that may carry per-turn emotion labels.
    pub const EMOTION_FIELDS: &[&str] = &["emotion"];
}

/// Candidate field names for single-turn question/answer datasets, in priority order.
pub mod counseling {
    /// Fields that may carry the user-side text.
    pub const USER_FIELDS: &[&str] = &[
        "Context",
        "context",
        "question",
        "prompt",
        "input",
        "utterance",
        "text",
        "instruction",
    ];
    /// Fields that may carry the assistant-side text.
    pub const ASSISTANT_FIELDS: &[&str] = &[
        "Response",
        "response",
        "answer",
        "output",
        "reply",
        "assistant",
        "completion",
    ];
    /// Fields that may carry an intent or topic tag.
    pub const INTENT_FIELDS: &[&str] = &["Intent", "intent", "topic", "category"];
    /// Intent used when a row carries no intent/topic value.
    pub const DEFAULT_INTENT: &str = "counseling";
}

/// Defaults used by the dataset preparation runners.
pub mod prepare {
    /// DailyDialog dataset identifier.
    pub const DAILYDIALOG_DATASET_ID: &str =
        "thedevastator/dailydialog-multi-turn-dialog-with-intention-and";
    /// Local directory expected to hold the downloaded DailyDialog files.
    pub const DAILYDIALOG_DATASET_ROOT: &str = "data/dailydialog";
    /// File paths tried, in order, when no explicit DailyDialog file is given.
    /// The empty entry means auto-detect inside the dataset root.
    pub const DAILYDIALOG_FILE_CANDIDATES: &[&str] =
        &["DailyDialog.csv", "dailydialog.csv", "data.csv", ""];
    /// Default cap on exported DailyDialog examples.
    pub const DAILYDIALOG_MAX_EXAMPLES: i64 = 2000;
    /// Default DailyDialog output path.
    pub const DAILYDIALOG_OUTPUT: &str = "data/dailydialog_examples.json";

    /// Counseling Q/A dataset identifier on the Hugging Face Hub.
    pub const COUNSELING_DATASET_ID: &str = "Amod/mental_health_counseling_conversations";
    /// Default dataset split for counseling data.
    pub const COUNSELING_SPLIT: &str = "train";
    /// Default cap on exported counseling examples.
    pub const COUNSELING_MAX_EXAMPLES: i64 = 3000;
    /// Default counseling output path.
    pub const COUNSELING_OUTPUT: &str = "data/mental_health_counseling_examples.json";
}

/// Constants used by dataset file loading.
pub mod source {
    /// Extensions recognized as JSON documents.
    pub const JSON_EXTENSIONS: &[&str] = &["json"];
    /// Extensions recognized as JSON-lines documents.
    pub const JSON_LINES_EXTENSIONS: &[&str] = &["jsonl", "ndjson"];
    /// Extensions recognized as CSV tables.
    pub const CSV_EXTENSIONS: &[&str] = &["csv"];
    /// Extensions recognized as parquet shards.
    pub const PARQUET_EXTENSIONS: &[&str] = &["parquet"];
    /// Envelope keys that may wrap a row array in a JSON document.
    pub const JSON_ROW_ARRAY_KEYS: &[&str] = &["rows", "data"];
    /// Envelope key wrapping a single row (datasets-server style).
    pub const JSON_ROW_KEY: &str = "row";
    /// Source id used by the local file loader.
    pub const LOCAL_SOURCE_ID: &str = "local";
    /// Source id used by the Hugging Face Hub loader.
    pub const HUGGINGFACE_SOURCE_ID: &str = "hf";
    /// Retries passed to the hf-hub client.
    pub const HUGGINGFACE_RETRIES: usize = 5;
}
