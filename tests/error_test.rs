use std::io;
use std::path::PathBuf;

use stencil::error::Error;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::ConfigError("invalid config".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid config.");

    let err = Error::EntryConflict {
        path: PathBuf::from("/tmp/proj/src"),
        expected: "directory",
        found: "file",
    };
    assert_eq!(
        err.to_string(),
        "Cannot create directory '/tmp/proj/src': a file already exists."
    );

    let err = Error::ExternalToolError {
        command: "pandoc -f docbook -o a.md a.xml".to_string(),
        status: "exit status: 1".to_string(),
        stderr: "unknown reader".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Command `pandoc -f docbook -o a.md a.xml` failed with exit status: 1: unknown reader"
    );

    let err = Error::MissingOutputError(PathBuf::from("gen/docbook/a.xml"));
    assert_eq!(err.to_string(), "Expected output was not generated: 'gen/docbook/a.xml'.");
}
