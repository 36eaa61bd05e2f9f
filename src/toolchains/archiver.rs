//! The static archiver abstraction.

/// A concrete static archiver.
pub trait Archiver {
    /// Short identifier, e.g. `ar`.
    fn id(&self) -> &'static str;

    /// The command used to invoke the archiver.
    fn command(&self) -> &[String];

    /// Arguments this archiver always receives, before the output and members.
    fn always_args(&self) -> Vec<String>;
}

/// GNU ar.
#[derive(Debug, Clone)]
pub struct Gnu {
    command: Vec<String>,
}

impl Gnu {
    /// Creates an archiver description from its invocation command.
    #[must_use]
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

impl Archiver for Gnu {
    fn id(&self) -> &'static str {
        "ar"
    }

    fn command(&self) -> &[String] {
        &self.command
    }

    fn always_args(&self) -> Vec<String> {
        vec!["csr".into()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gnu_ar() {
        let archiver = Gnu::new(vec!["ar".into()]);
        assert_eq!(archiver.id(), "ar");
        assert_eq!(archiver.always_args(), vec!["csr"]);
    }
}
