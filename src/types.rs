/// Field name inside a raw dataset row.
/// Examples: `dialog`, `Context`, `Response`
pub type FieldName = String;
/// One conversational utterance extracted from a row.
/// Example: `How are you?`
pub type Turn = String;
/// Intent or emotion tag attached to a turn.
/// Examples: `inform`, `question`, `happiness`, `anxiety`
pub type Label = String;
/// Identifier for the dataset a run reads from.
/// Examples: `thedevastator/dailydialog-multi-turn-dialog-with-intention-and`, `Amod/mental_health_counseling_conversations`
pub type DatasetId = String;
/// Identifier for a concrete loader used in error reporting.
/// Examples: `local`, `hf`
pub type SourceId = String;
/// Dataset-relative file path tried while loading.
/// Examples: `DailyDialog.csv`, `data/train-00000-of-00001.parquet`, `` (auto-detect)
pub type CandidatePath = String;
