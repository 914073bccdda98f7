//! Error types for explicit DUT analysis.

use std::path::PathBuf;

/// Errors reported by [`crate::analyze_dut`].
///
/// Implicit lookups (port matching while rendering the top module) never
/// surface these; they degrade to "no ports found" instead.
#[derive(Debug, thiserror::Error)]
pub enum HdlError {
    /// The DUT source file could not be read.
    #[error("failed to read DUT source '{}': {source}", path.display())]
    Read {
        /// The file that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file was read but contains no module declaration.
    #[error("no module declaration found in '{}'", path.display())]
    NoModule {
        /// The file that was analyzed.
        path: PathBuf,
    },

    /// No DUT path was configured.
    #[error("no DUT file path configured")]
    NoPath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_read() {
        let err = HdlError::Read {
            path: PathBuf::from("rtl/alu.sv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(format!("{err}"), "failed to read DUT source 'rtl/alu.sv': not found");
    }

    #[test]
    fn display_no_module() {
        let err = HdlError::NoModule {
            path: PathBuf::from("pkg.sv"),
        };
        assert_eq!(format!("{err}"), "no module declaration found in 'pkg.sv'");
    }

    #[test]
    fn display_no_path() {
        assert_eq!(format!("{}", HdlError::NoPath), "no DUT file path configured");
    }
}
