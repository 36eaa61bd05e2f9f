use thiserror::Error;

macro_rules! malformed_ir {
    // Single string version
    ($msg:expr) => {
        crate::Error::MalformedIr {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::MalformedIr {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The compiler core is largely total on well-formed input: the version comparator accepts any
/// string, and a pass that finds nothing to do simply reports no progress. The conditions that
/// *do* fail are structural defects in the incoming IR, inconsistent machine descriptions, and
/// I/O while emitting the backend file.
///
/// # Error Categories
///
/// ## IR Errors
/// - [`Error::MalformedIr`] - The IR references something that does not exist on any reaching path
///
/// ## Machine Errors
/// - [`Error::InconsistentMachineInfo`] - A machine query requests a field the machine tables
///   cannot answer
///
/// ## I/O and External Errors
/// - [`Error::FileError`] - Filesystem I/O errors
/// - [`Error::ParseError`] - Malformed machine files
///
/// # Examples
///
/// ```rust,no_run
/// use mortar::{machines, Error, Mir};
///
/// let mut mir = Mir::new();
/// let info = machines::PerMachine::new(machines::detect_build());
/// match mortar::passes::optimize(&mut mir, &info) {
///     Ok(()) => println!("pipeline settled"),
///     Err(Error::MalformedIr { message, file, line }) => {
///         eprintln!("malformed IR: {} ({}:{})", message, file, line);
///     }
///     Err(e) => eprintln!("other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The IR is structurally broken and the pipeline cannot continue.
    ///
    /// Raised when an identifier names a variable never defined on any reaching path, or a phi
    /// sits at a block with fewer than two parents. The error includes the source location where
    /// the defect was detected for debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of the defect, including the offending block
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed IR - {file}:{line}: {message}")]
    MalformedIr {
        /// The message to be printed for the MalformedIr error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A machine query requested a field the machine tables cannot answer.
    ///
    /// This occurs when the build definition calls a method like `host_machine.foo()` that no
    /// machine description provides. Fatal for the current compilation; no recovery is attempted.
    #[error("Machine object '{object}' has no method '{method}'")]
    InconsistentMachineInfo {
        /// The machine object the build definition queried
        object: String,
        /// The method that could not be answered
        method: String,
    },

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur while reading machine files or writing the
    /// backend output.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// A machine file could not be parsed.
    #[error("{0}")]
    ParseError(#[from] serde_json::Error),
}
