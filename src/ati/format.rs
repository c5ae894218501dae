//! Response formats and API routes.
//!
//! The AT Internet v2 endpoint encodes both the payload format and the
//! operation into the URL path: `/data/v2/{format}/{route}`. Not every
//! format is valid on every route, so routes narrow an incompatible format
//! back to `json` rather than letting the provider reject the call.

use std::fmt;

/// Payload format requested from the provider.
///
/// `json` is decoded into structured batches; the other formats pass
/// through as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Json,
    Html,
    Xml,
    Csv,
}

impl ResponseFormat {
    /// Path segment for this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Html => "html",
            Self::Xml => "xml",
            Self::Csv => "csv",
        }
    }

    /// Parses a format name, falling back to `json` for anything
    /// unrecognized. The provider treats unknown formats the same way.
    pub fn parse_or_default(s: &str) -> Self {
        match s {
            "html" => Self::Html,
            "xml" => Self::Xml,
            "csv" => Self::Csv,
            _ => Self::Json,
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three operations the provider exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Paged data retrieval
    GetData,
    /// Total row count for a query
    GetRowCount,
    /// Most recent timestamp with available data
    GetMaxDate,
}

impl Route {
    /// Path segment for this route.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetData => "getdata",
            Self::GetRowCount => "getrowcount",
            Self::GetMaxDate => "getmaxdate",
        }
    }

    /// Narrows a requested format to one this route supports.
    ///
    /// `csv` exists only on the data route; row-count and max-date fall
    /// back to `json` for it.
    pub fn narrow_format(&self, format: ResponseFormat) -> ResponseFormat {
        match self {
            Self::GetData => format,
            Self::GetRowCount | Self::GetMaxDate => match format {
                ResponseFormat::Csv => ResponseFormat::Json,
                other => other,
            },
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_path_segments() {
        assert_eq!(ResponseFormat::Json.as_str(), "json");
        assert_eq!(ResponseFormat::Csv.as_str(), "csv");
    }

    #[test]
    fn test_parse_or_default() {
        assert_eq!(ResponseFormat::parse_or_default("xml"), ResponseFormat::Xml);
        assert_eq!(ResponseFormat::parse_or_default("csv"), ResponseFormat::Csv);
        assert_eq!(
            ResponseFormat::parse_or_default("parquet"),
            ResponseFormat::Json
        );
        assert_eq!(ResponseFormat::parse_or_default(""), ResponseFormat::Json);
    }

    #[test]
    fn test_csv_narrowed_on_scalar_routes() {
        assert_eq!(
            Route::GetRowCount.narrow_format(ResponseFormat::Csv),
            ResponseFormat::Json
        );
        assert_eq!(
            Route::GetMaxDate.narrow_format(ResponseFormat::Csv),
            ResponseFormat::Json
        );
    }

    #[test]
    fn test_csv_allowed_on_data_route() {
        assert_eq!(
            Route::GetData.narrow_format(ResponseFormat::Csv),
            ResponseFormat::Csv
        );
    }

    #[test]
    fn test_non_csv_formats_pass_through() {
        assert_eq!(
            Route::GetRowCount.narrow_format(ResponseFormat::Xml),
            ResponseFormat::Xml
        );
        assert_eq!(
            Route::GetMaxDate.narrow_format(ResponseFormat::Html),
            ResponseFormat::Html
        );
    }
}
