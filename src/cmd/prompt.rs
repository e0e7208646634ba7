use std::io::{self, BufRead, Write};

use crate::error::AppResult;

/// Returns `provided` when set, otherwise asks on stdout and reads one line
/// from stdin. End of input reads as an empty answer.
pub fn value_or_prompt(provided: Option<String>, question: &str) -> AppResult<String> {
    match provided {
        Some(value) => Ok(value),
        None => ask(&mut io::stdin().lock(), &mut io::stdout(), question),
    }
}

pub fn ask(input: &mut impl BufRead, output: &mut impl Write, question: &str) -> AppResult<String> {
    write!(output, "{question}:  ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim_end_matches(['\r', '\n']).to_string())
}

/// `abc***xyz` style rendering for secrets echoed back to the operator.
pub fn mask_secret(value: Option<&str>) -> String {
    match value {
        Some(token) if token.len() > 6 && token.is_ascii() => {
            let prefix = &token[..3];
            let suffix = &token[token.len() - 3..];
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}
