//! Shared fakes for driving a `Session` without a terminal or a cluster.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use kubermon_cli::selection::Prompter;
use kubermon_core::error::{Error, Result};
use kubermon_core::execution::CommandRunner;

pub const NAMESPACE_NAMES: &str = "kubectl get ns --no-headers -o custom-columns=:metadata.name";

enum Response {
    Output(String),
    Failure { code: i32, stderr: String },
}

/// Answers exact command lines with canned output and records every call.
#[derive(Default)]
pub struct FakeRunner {
    responses: HashMap<String, Response>,
    pub commands: RefCell<Vec<String>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, command_line: &str, output: &str) -> Self {
        self.responses.insert(
            command_line.to_string(),
            Response::Output(output.to_string()),
        );
        self
    }

    pub fn failing(mut self, command_line: &str, code: i32, stderr: &str) -> Self {
        self.responses.insert(
            command_line.to_string(),
            Response::Failure {
                code,
                stderr: stderr.to_string(),
            },
        );
        self
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, command_line: &str) -> Result<String> {
        self.commands.borrow_mut().push(command_line.to_string());

        match self.responses.get(command_line) {
            Some(Response::Output(output)) => Ok(output.clone()),
            Some(Response::Failure { code, stderr }) => Err(Error::sub_process_exit(
                command_line.to_string(),
                Some(*code),
                stderr.clone(),
            )),
            None => panic!("unexpected command: {command_line}"),
        }
    }
}

/// Replays queued answers and records what was asked.
#[derive(Default)]
pub struct ScriptedPrompter {
    selections: VecDeque<Option<String>>,
    confirmations: VecDeque<bool>,
    pub asked: Vec<(String, Vec<String>)>,
    pub confirm_messages: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn choose(mut self, choice: &str) -> Self {
        self.selections.push_back(Some(choice.to_string()));
        self
    }

    pub fn cancel(mut self) -> Self {
        self.selections.push_back(None);
        self
    }

    pub fn answer(mut self, confirmed: bool) -> Self {
        self.confirmations.push_back(confirmed);
        self
    }

    pub fn prompt_messages(&self) -> Vec<&str> {
        self.asked.iter().map(|(message, _)| message.as_str()).collect()
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, message: &str, choices: &[String]) -> Result<Option<String>> {
        self.asked.push((message.to_string(), choices.to_vec()));

        let answer = self
            .selections
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted answer for `{message}`"));

        if let Some(choice) = &answer {
            assert!(
                choices.contains(choice),
                "`{choice}` is not among the offered choices {choices:?}"
            );
        }

        Ok(answer)
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        self.confirm_messages.push(message.to_string());
        Ok(self
            .confirmations
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted confirmation for `{message}`")))
    }
}
