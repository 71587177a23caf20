//! Library integration tests.

use recept::ReceptError;

#[test]
fn error_types_are_public() {
    let err = ReceptError::UnknownTool {
        name: "test".into(),
    };
    assert!(err.to_string().contains("test"));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> recept::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use recept::cli::{Cli, Commands};

    let cli = Cli::parse_from(["recept", "which", "python"]);

    if let Commands::Which(args) = cli.command {
        assert_eq!(args.tool, "python");
    } else {
        panic!("Expected Which command");
    }
}

#[test]
fn ui_types_are_public() {
    use recept::ui::{Color, MockUI, OutputMode, UserInterface};

    let mut ui = MockUI::with_mode(OutputMode::Verbose);
    ui.success("ok");
    assert_eq!(ui.successes(), ["ok"]);
    assert!(Color::Green.paint("ok").contains("ok"));
}

#[test]
fn builtins_are_public() {
    use recept::shell::Builtin;

    assert_eq!(Builtin::ALL.len(), 13);
    assert_eq!(Builtin::from_name("pytest"), Some(Builtin::Pytest));
}
