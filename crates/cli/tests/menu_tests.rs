//! Integration tests for the menu loop

mod common;

use common::{FakeRunner, ScriptedPrompter};
use kubermon_cli::handlers::Session;
use kubermon_cli::menu::{menu_prompt, run_menu, CONTINUE_PROMPT, MENU_PROMPT};
use kubermon_core::actions::Action;
use kubermon_core::error::{Error, Result};
use kubermon_core::kubectl::Kubectl;

fn run(runner: &FakeRunner, prompter: &mut ScriptedPrompter) -> (Result<()>, String) {
    let kubectl = Kubectl::new(runner, "kubectl");
    let mut out: Vec<u8> = Vec::new();
    let result = {
        let mut session = Session::new(kubectl, prompter, &mut out);
        run_menu(&mut session, false)
    };
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn test_menu_offers_every_action_in_order() {
    let runner = FakeRunner::new();
    let mut prompter = ScriptedPrompter::new().cancel();

    let (result, output) = run(&runner, &mut prompter);

    assert!(result.is_ok());
    let (message, choices) = &prompter.asked[0];
    assert_eq!(*message, menu_prompt());
    assert!(message.ends_with(MENU_PROMPT));
    assert!(message.contains(env!("CARGO_PKG_VERSION")));
    assert_eq!(choices.len(), 21);
    assert_eq!(choices[0], "get-nodes (List all nodes)");
    assert_eq!(choices[20], Action::ServicesLogs.to_string());
    assert!(output.contains(&format!(
        "Welcome to Kubermon! (v{})",
        env!("CARGO_PKG_VERSION")
    )));
    assert!(output.ends_with("No selection made. Exiting.\n"));
    assert!(runner.commands().is_empty());
}

#[test]
fn test_menu_runs_action_then_exits() {
    let runner = FakeRunner::new().with("kubectl get nodes", "worker-1   Ready\n");
    let mut prompter = ScriptedPrompter::new()
        .choose(&Action::GetNodes.to_string())
        .answer(false);

    let (result, output) = run(&runner, &mut prompter);

    assert!(result.is_ok());
    assert_eq!(prompter.confirm_messages, vec![CONTINUE_PROMPT]);
    assert!(output.contains("worker-1   Ready\n"));
    assert!(output.ends_with("Exiting Kubermon.\n"));
}

#[test]
fn test_menu_repeats_until_declined() {
    let runner = FakeRunner::new()
        .with("kubectl get nodes", "worker-1   Ready\n")
        .with("kubectl get namespaces", "default   Active\n");
    let mut prompter = ScriptedPrompter::new()
        .choose(&Action::GetNodes.to_string())
        .answer(true)
        .choose(&Action::ListNamespaces.to_string())
        .answer(false);

    let (result, output) = run(&runner, &mut prompter);

    assert!(result.is_ok());
    assert_eq!(
        runner.commands(),
        vec!["kubectl get nodes", "kubectl get namespaces"]
    );
    assert_eq!(output.matches("Welcome to Kubermon!").count(), 2);
}

#[test]
fn test_menu_continues_after_cancelled_handler() {
    let runner = FakeRunner::new().with(
        "kubectl get ns --no-headers -o custom-columns=:metadata.name",
        "default\n",
    );
    let mut prompter = ScriptedPrompter::new()
        .choose(&Action::Events.to_string())
        .cancel()
        .answer(false);

    let (result, output) = run(&runner, &mut prompter);

    assert!(result.is_ok());
    assert!(output.contains("No namespace selected.\n"));
    assert_eq!(prompter.confirm_messages.len(), 1);
}

#[test]
fn test_menu_stops_on_command_failure() {
    let runner = FakeRunner::new().failing("kubectl get nodes", 1, "Unauthorized");
    let mut prompter = ScriptedPrompter::new().choose(&Action::GetNodes.to_string());

    let (result, _) = run(&runner, &mut prompter);

    assert!(matches!(result, Err(Error::SubProcessExit { .. })));
    assert!(prompter.confirm_messages.is_empty());
}
