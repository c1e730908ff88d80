use std::process::ExitStatus;

use thiserror::Error;

/// Failures talking to the poppler command-line tools.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to invoke {tool}; is poppler-utils installed?")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} failed with status {status}: {stderr}")]
    ToolFailed {
        tool: &'static str,
        status: ExitStatus,
        stderr: String,
    },

    #[error("malformed word layout output: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("<{element}> is missing attribute {name}")]
    MissingAttribute {
        element: &'static str,
        name: &'static str,
    },

    #[error("attribute {name}={value:?} is not a number")]
    Attribute { name: String, value: String },

    #[error("pdfinfo output did not contain a usable 'Pages:' line")]
    PageCount,
}
