use fractic_server_error::{define_client_error, define_internal_error};

// IO-related.
define_internal_error!(StorageReadError, "Error reading stored value for key '{key}'.", { key: &str });
define_internal_error!(StorageWriteError, "Error writing stored value for key '{key}'.", { key: &str });
define_client_error!(ReadError, "Error reading file.");

// Parsing-related.
define_client_error!(InvalidRon, "Invalid {ron_type} (invalid RON format).", { ron_type: &str });
define_client_error!(InvalidIsoCurrencyCode, "Invalid ISO currency code: {code}.", { code: &str });

// Export-related.
define_internal_error!(
    ExportWriteFailed,
    "Failed to write export document '{file_name}'.",
    { file_name: &str }
);
define_internal_error!(
    CsvEncodingFailed,
    "Failed to encode purchase summary as CSV ({stage}).",
    { stage: &str }
);
define_client_error!(
    NothingToExport,
    "There is no finalized purchase to export."
);
