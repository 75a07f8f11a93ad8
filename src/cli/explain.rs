use crate::json::ErrorKind;

pub const INVALID_COMMAND: &str = "InvalidCommand";

pub const AVAILABLE_KINDS: &[(&str, &str)] = &[
    (
        INVALID_COMMAND,
        "Configuration line matches no rule for the current block state",
    ),
    (
        ErrorKind::UnexpectedToken.as_str(),
        "A JSON token appears where the grammar does not allow it",
    ),
    (
        ErrorKind::MismatchedBracket.as_str(),
        "A closing bracket does not match the innermost open bracket",
    ),
    (
        ErrorKind::UnbalancedBracket.as_str(),
        "A closing bracket with nothing open to close",
    ),
    (
        ErrorKind::MissingColon.as_str(),
        "An object key is not followed by ':'",
    ),
    (
        ErrorKind::MissingComma.as_str(),
        "Two members or elements with no ',' between them",
    ),
    (
        ErrorKind::TrailingComma.as_str(),
        "A ',' directly before a closing bracket",
    ),
    (
        ErrorKind::InvalidValue.as_str(),
        "A malformed number, literal, escape or stray character",
    ),
    (
        ErrorKind::UnterminatedString.as_str(),
        "A string without a closing quote on its line",
    ),
    (
        ErrorKind::UnexpectedEndOfInput.as_str(),
        "Input ended with open brackets or without any value",
    ),
];

pub fn list_kinds() -> String {
    use std::fmt::Write;
    let mut out = String::from("Available error kinds:\n\n");
    for (name, desc) in AVAILABLE_KINDS {
        let _ = writeln!(out, "  {name:<22} {desc}");
    }
    out.push_str("\nRun `automalint explain <kind>` for details.");
    out
}

/// `TrailingComma`, `trailing-comma` and `trailing_comma` all name the same kind.
fn normalize(kind: &str) -> String {
    kind.chars()
        .filter(|c| *c != '-' && *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

pub fn explain(kind: &str) -> Option<&'static str> {
    match normalize(kind).as_str() {
        "invalidcommand" => Some(
            "InvalidCommand: A configuration line matches none of the rules for its block.\n\
             \n\
             The line automaton starts in GLOBAL. A trigger line such as `interface Gi0/1`\n\
             moves it into a block state (INTERFACE); indented lines after it are checked\n\
             against that state's patterns. A blank line, a `!` comment or any line that\n\
             does not start with a space returns to GLOBAL.\n\
             \n\
             A state with no rules at all rejects every line, so a trigger whose target\n\
             state is missing from the rule file flags the whole block.\n\
             \n\
             Reported by: automalint config\n\
             Fix: correct the command, or add a pattern for it under the reported state",
        ),
        "unexpectedtoken" => Some(
            "UnexpectedToken: A token appears where the grammar does not allow it.\n\
             \n\
             Examples: a ':' that does not follow a key (`{\"a\":: 1}`), a leading or doubled\n\
             comma (`[,1]`, `[1,,2]`), a non-string object key (`{1: 2}`), or a second value\n\
             after the document is complete (`{} {}`).\n\
             \n\
             Reported by: automalint json\n\
             Fix: remove the token, or quote keys and wrap multiple values in an array",
        ),
        "mismatchedbracket" => Some(
            "MismatchedBracket: A closer does not match the innermost open bracket.\n\
             \n\
             In `{\"a\": [1, 2}` the '}' arrives while '[' is still open. The stack snapshot\n\
             shows every open bracket at that moment, outermost first. If a matching opener\n\
             exists further out, the inner brackets are treated as closed so scanning can\n\
             continue; otherwise the stray closer is ignored.\n\
             \n\
             Reported by: automalint json\n\
             Fix: add the missing closer named in the suggestion",
        ),
        "unbalancedbracket" => Some(
            "UnbalancedBracket: A closing bracket with nothing open.\n\
             \n\
             In `[1]]` the second ']' has no '[' left to close.\n\
             \n\
             Reported by: automalint json\n\
             Fix: remove the extra closer",
        ),
        "missingcolon" => Some(
            "MissingColon: An object key is not followed by ':'.\n\
             \n\
             Examples: `{\"a\" 1}` and `{\"a\"}`.\n\
             \n\
             Reported by: automalint json\n\
             Fix: write `\"key\": value`",
        ),
        "missingcomma" => Some(
            "MissingComma: Two members or elements are not separated by ','.\n\
             \n\
             In `{\"a\": 1 \"b\": 2}` the error points at `\"b\"`, which is then read as the\n\
             next key so the rest of the object is still checked.\n\
             \n\
             Reported by: automalint json\n\
             Fix: insert ',' before the reported token",
        ),
        "trailingcomma" => Some(
            "TrailingComma: A ',' directly before '}' or ']'.\n\
             \n\
             JSON does not allow `[1, 2,]` or `{\"a\": 1,}`. The error points at the comma.\n\
             \n\
             Reported by: automalint json\n\
             Fix: remove the comma",
        ),
        "invalidvalue" => Some(
            "InvalidValue: A lexeme that is not valid JSON.\n\
             \n\
             Covers malformed numbers (`01`, `1.`, `+1`), unknown barewords (`undefined`,\n\
             `True`), bad escapes (`\"\\q\"`), raw control characters inside strings and\n\
             stray characters such as `@`. The token is then treated as a value so the\n\
             surrounding structure is still checked.\n\
             \n\
             Reported by: automalint json\n\
             Fix: follow the suggestion for the specific lexeme",
        ),
        "unterminatedstring" => Some(
            "UnterminatedString: A string has no closing quote before the end of its line.\n\
             \n\
             JSON strings cannot contain raw newlines, so the string is cut at the line end\n\
             and scanning resumes on the next line.\n\
             \n\
             Reported by: automalint json\n\
             Fix: close the string, or write the newline as \\n",
        ),
        "unexpectedendofinput" => Some(
            "UnexpectedEndOfInput: The input ended too early.\n\
             \n\
             Either brackets are still open (the suggestion lists the closers needed,\n\
             innermost first) or the input holds no value at all.\n\
             \n\
             Reported by: automalint json\n\
             Fix: add the missing closers or content",
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_kinds_have_explanations() {
        for (kind, _) in AVAILABLE_KINDS {
            assert!(
                explain(kind).is_some(),
                "Kind '{kind}' should have an explanation"
            );
        }
    }

    #[test]
    fn test_every_error_kind_is_listed() {
        for kind in ErrorKind::ALL {
            assert!(AVAILABLE_KINDS.iter().any(|(name, _)| *name == kind.as_str()));
        }
    }

    #[test]
    fn test_kind_spellings() {
        assert!(explain("TrailingComma").is_some());
        assert!(explain("trailing-comma").is_some());
        assert!(explain("unexpected_end_of_input").is_some());
        assert!(explain("invalid-command").is_some());
    }

    #[test]
    fn test_unknown_kind_returns_none() {
        assert!(explain("nonexistent-kind").is_none());
    }

    #[test]
    fn test_explanations_name_the_command() {
        for (kind, _) in AVAILABLE_KINDS {
            let text = explain(kind).unwrap();
            assert!(
                text.contains("Reported by:"),
                "Explanation for '{kind}' should say which command reports it"
            );
        }
    }

    #[test]
    fn test_list_kinds_contains_all() {
        let listing = list_kinds();
        for (kind, desc) in AVAILABLE_KINDS {
            assert!(listing.contains(kind), "Listing should contain {kind}");
            assert!(listing.contains(desc));
        }
    }
}
