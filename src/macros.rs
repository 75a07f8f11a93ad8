/// Record a structural error at `$at` (anything with `line` and `position`),
/// snapshotting the automaton's stack as it is right now.
#[macro_export]
macro_rules! emit {
    ($pda:expr, $kind:expr, $at:expr, $($msg:tt)+) => {{
        let error = $crate::json::pda::ValidationError {
            error_type: $kind,
            position: $at.position,
            line: $at.line,
            stack_snapshot: $pda.stack.snapshot(),
            suggestion: format!($($msg)+),
        };
        tracing::debug!(
            kind = %error.error_type,
            line = error.line,
            position = error.position,
            "structural error"
        );
        $pda.errors.push(error);
    }};
}
