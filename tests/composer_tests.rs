//! Test suite for the expression composer
//!
//! Tests cover:
//! - Default and cleared states
//! - Digit, operator and function transitions in both machine states
//! - Positional deletion and the single-character reset
//! - Glyph projection at submission time and its purity
//! - Outcome mapping for numbers, verbatim error text, rejected requests and
//!   unreachable backends
//! - A full round trip through the local symbolic engine

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use calcpad::{
    Composer, ComposerState, Evaluation, Evaluator, EvaluatorError, Function, Operator,
    SymbolicEngine, CONNECTION_ERROR_TOKEN, ERROR_TOKEN,
};

/// Stub evaluator with a canned reply, recording every submitted expression.
struct ScriptedEvaluator {
    reply: Result<Evaluation, EvaluatorError>,
    submitted: Mutex<Vec<String>>,
}

impl ScriptedEvaluator {
    fn replying(reply: Result<Evaluation, EvaluatorError>) -> Arc<Self> {
        Arc::new(ScriptedEvaluator {
            reply,
            submitted: Mutex::new(Vec::new()),
        })
    }

    fn last_submission(&self) -> Option<String> {
        self.submitted.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Evaluator for ScriptedEvaluator {
    async fn evaluate(&self, expression: &str) -> Result<Evaluation, EvaluatorError> {
        self.submitted.lock().unwrap().push(expression.to_string());
        self.reply.clone()
    }
}

#[test]
fn fresh_state_defaults() {
    let state = ComposerState::new();
    assert_eq!(state.display(), "0");
    assert_eq!(state.expression(), "");
    assert!(!state.is_result());
}

#[test]
fn digits_replace_the_placeholder_zero_then_append() {
    let state = ComposerState::new().digit('1').digit('2').digit('.').digit('5');
    assert_eq!(state.display(), "12.5");
    assert_eq!(state.expression(), "12.5");
}

#[test]
fn malformed_numbers_are_composed_without_complaint() {
    // well-formedness is the evaluator's job, not the composer's
    let state = ComposerState::new().digit('1').digit('.').digit('2').digit('.');
    assert_eq!(state.display(), "1.2.");
}

#[test]
fn operator_replaces_on_zero() {
    let state = ComposerState::new().operator(Operator::OpenParen);
    assert_eq!(state.display(), "(");
    assert_eq!(state.expression(), "(");
}

#[test]
fn operators_append_mid_composition() {
    let state = ComposerState::new()
        .digit('2')
        .operator(Operator::Add)
        .digit('3')
        .operator(Operator::Multiply)
        .digit('4');
    assert_eq!(state.display(), "2+3×4");
    assert_eq!(state.expression(), "2+3×4");
}

#[test]
fn pi_shortcut_stays_symbolic() {
    let state = ComposerState::new().operator(Operator::Pi);
    assert_eq!(state.expression(), "π");
    assert_eq!(state.submission(), "pi");
    // never a decimal approximation
    assert!(!state.expression().contains("3.14"));
    assert!(!state.submission().contains("3.14"));
}

#[test]
fn functions_append_an_unclosed_call() {
    let state = ComposerState::new().digit('5').function(Function::Sin);
    assert_eq!(state.display(), "5sin(");
    assert_eq!(state.expression(), "5sin(");
}

#[test]
fn delete_is_positional_not_semantic() {
    let state = ComposerState::new().digit('5').function(Function::Sin);
    let state = state.delete_last();
    // only the parenthesis goes, not the whole token
    assert_eq!(state.display(), "5sin");
    assert_eq!(state.expression(), "5sin");
}

#[test]
fn delete_past_the_last_character_resets() {
    let state = ComposerState::new().digit('5').delete_last();
    assert_eq!(state.display(), "0");
    assert_eq!(state.expression(), "");

    // deleting the placeholder zero keeps the cleared state
    let state = state.delete_last();
    assert_eq!(state.display(), "0");
    assert_eq!(state.expression(), "");
}

#[test]
fn delete_on_single_character_resets_regardless_of_content() {
    let state = ComposerState::new().operator(Operator::Add).delete_last();
    assert_eq!(state.display(), "0");
    assert_eq!(state.expression(), "");
}

#[test]
fn clear_restores_the_default_state_from_anywhere() {
    let fresh = ComposerState::new();
    assert_eq!(fresh.clear(), fresh);

    let mid_composition = fresh.digit('2').operator(Operator::Divide).digit('7');
    assert_eq!(mid_composition.clear(), fresh);

    let showing_result = mid_composition.show_result("14");
    assert_eq!(showing_result.clear(), fresh);
}

#[test]
fn display_is_never_empty_along_any_path() {
    let mut state = ComposerState::new();
    let presses: Vec<Box<dyn Fn(&ComposerState) -> ComposerState>> = vec![
        Box::new(|s| s.digit('9')),
        Box::new(|s| s.operator(Operator::Power)),
        Box::new(|s| s.function(Function::Log)),
        Box::new(|s| s.delete_last()),
        Box::new(|s| s.delete_last()),
        Box::new(|s| s.delete_last()),
        Box::new(|s| s.delete_last()),
        Box::new(|s| s.delete_last()),
        Box::new(|s| s.delete_last()),
        Box::new(|s| s.clear()),
        Box::new(|s| s.show_result("Error")),
        Box::new(|s| s.digit('1')),
    ];
    for press in presses {
        state = press(&state);
        assert!(!state.display().is_empty());
    }
}

#[test]
fn result_seeds_a_fresh_number_on_digit() {
    let state = ComposerState::new().show_result("14").digit('5');
    assert_eq!(state.display(), "5");
    assert_eq!(state.expression(), "5");
    assert!(!state.is_result());
}

#[test]
fn result_seeds_continuation_on_operator() {
    let state = ComposerState::new().show_result("14").operator(Operator::Add);
    assert_eq!(state.expression(), "14+");
    assert!(!state.is_result());
}

#[test]
fn result_is_wrapped_by_a_function_press() {
    let state = ComposerState::new().show_result("14").function(Function::Sin);
    assert_eq!(state.display(), "sin(14)");
    assert_eq!(state.expression(), "sin(14)");
    assert!(!state.is_result());
}

#[tokio::test]
async fn composed_expression_is_normalized_on_submit() {
    let evaluator = ScriptedEvaluator::replying(Ok(Evaluation::Number(14.0)));
    let mut composer = Composer::new(evaluator.clone());

    composer.press_digit('2');
    composer.press_operator(Operator::Add);
    composer.press_digit('3');
    composer.press_operator(Operator::Multiply);
    composer.press_digit('4');

    // the state keeps its rendering glyphs right up to the submit
    assert_eq!(composer.state().expression(), "2+3×4");

    let state = composer.submit().await;
    assert_eq!(state.display(), "14");
    assert_eq!(state.expression(), "14");
    assert!(state.is_result());

    // the wire saw evaluator syntax; the substitution was never written back
    assert_eq!(evaluator.last_submission().unwrap(), "2+3*4");
}

#[tokio::test]
async fn glyph_projection_covers_division_and_pi() {
    let evaluator = ScriptedEvaluator::replying(Ok(Evaluation::Number(4.0)));
    let mut composer = Composer::new(evaluator.clone());

    composer.press_digit('8');
    composer.press_operator(Operator::Divide);
    composer.press_digit('2');
    composer.press_operator(Operator::Multiply);
    composer.press_operator(Operator::Pi);
    composer.submit().await;

    assert_eq!(evaluator.last_submission().unwrap(), "8/2*pi");
}

#[tokio::test]
async fn fresh_state_submits_the_placeholder_display() {
    let evaluator = ScriptedEvaluator::replying(Ok(Evaluation::Number(0.0)));
    let mut composer = Composer::new(evaluator.clone());

    composer.submit().await;
    assert_eq!(evaluator.last_submission().unwrap(), "0");
}

#[tokio::test]
async fn fractional_results_render_trimmed() {
    let evaluator = ScriptedEvaluator::replying(Ok(Evaluation::Number(2.5)));
    let mut composer = Composer::new(evaluator);

    composer.press_digit('5');
    let state = composer.submit().await;
    assert_eq!(state.display(), "2.5");
}

#[tokio::test]
async fn backend_error_text_is_shown_verbatim() {
    let message = "Error: Invalid mathematical expression - unmatched parenthesis";
    let evaluator =
        ScriptedEvaluator::replying(Ok(Evaluation::Text(message.to_string())));
    let mut composer = Composer::new(evaluator);

    composer.press_function(Function::Sqrt);
    let state = composer.submit().await;
    assert_eq!(state.display(), message);
    assert!(state.is_result());
}

#[tokio::test]
async fn rejected_requests_show_the_generic_error_token() {
    let evaluator = ScriptedEvaluator::replying(Err(EvaluatorError::Rejected(
        "backend answered with status 400".to_string(),
    )));
    let mut composer = Composer::new(evaluator);

    composer.press_digit('1');
    let state = composer.submit().await;
    assert_eq!(state.display(), ERROR_TOKEN);
    assert!(state.is_result());
}

#[tokio::test]
async fn unreachable_backend_shows_the_connection_error_token() {
    let evaluator = ScriptedEvaluator::replying(Err(EvaluatorError::Unreachable(
        "connection refused".to_string(),
    )));
    let mut composer = Composer::new(evaluator);

    composer.press_digit('1');
    let state = composer.submit().await;
    assert_eq!(state.display(), CONNECTION_ERROR_TOKEN);
    assert_eq!(state.expression(), CONNECTION_ERROR_TOKEN);
    assert!(state.is_result());
}

#[tokio::test]
async fn error_tokens_seed_the_next_composition_like_any_result() {
    let evaluator = ScriptedEvaluator::replying(Err(EvaluatorError::Unreachable(
        "connection refused".to_string(),
    )));
    let mut composer = Composer::new(evaluator);
    composer.submit().await;

    // no retry happens; the user just keeps going
    composer.press_digit('7');
    assert_eq!(composer.display(), "7");
    assert!(!composer.state().is_result());
}

#[tokio::test]
async fn round_trip_through_the_symbolic_engine() {
    let mut composer = Composer::new(Arc::new(SymbolicEngine::new()));

    composer.press_digit('2');
    composer.press_operator(Operator::Add);
    composer.press_digit('3');
    composer.press_operator(Operator::Multiply);
    composer.press_digit('4');

    let state = composer.submit().await;
    assert_eq!(state.display(), "14");
    assert!(state.is_result());

    // continue from the answer
    composer.press_operator(Operator::Add);
    composer.press_digit('2');
    let state = composer.submit().await;
    assert_eq!(state.display(), "16");
}

#[tokio::test]
async fn division_round_trip_is_floating_point() {
    let mut composer = Composer::new(Arc::new(SymbolicEngine::new()));

    composer.press_digit('7');
    composer.press_operator(Operator::Divide);
    composer.press_digit('2');

    let state = composer.submit().await;
    assert_eq!(state.display(), "3.5");
}

#[tokio::test]
async fn pi_round_trip_keeps_precision() {
    let mut composer = Composer::new(Arc::new(SymbolicEngine::new()));

    composer.press_digit('2');
    composer.press_operator(Operator::Multiply);
    composer.press_operator(Operator::Pi);

    let state = composer.submit().await;
    assert!(state.display().starts_with("6.283185307"));
}
