use catalog::MetadataKind;
use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Notification candidate has an empty user id"))]
    EmptyUserId,

    #[snafu(display("Template data requires at least one activity"))]
    NoActivities,

    #[snafu(display("Failed to fetch `{kind}` metadata, error: {source}"))]
    FetchMetadata { kind: MetadataKind, source: catalog::Error },

    #[snafu(display("Failed to serialize template data, error: {source}"))]
    SerializeTemplateData { source: serde_json::Error },

    #[snafu(display("Failed to dispatch notification to {recipient}, error: {source}"))]
    Dispatch { recipient: String, source: notification::Error },
}
