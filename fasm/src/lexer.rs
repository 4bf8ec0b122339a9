use crate::parser::{ForthParser, Rule};
use crate::term::{word_to_kind, Term, TermKind};
use crate::Result;
use matches::debug_assert_matches;
use pest::Parser;

/// Tokenizes the source into the term list. The head of the list is the
/// synthetic entrypoint term; every source word follows in order.
pub fn split_to_terms(input: &str) -> Result<Vec<Term>> {
    let program = ForthParser::parse(Rule::program, input)?.next().unwrap();
    debug_assert_matches!(program.as_rule(), Rule::program);

    let mut terms = vec![Term::entrypoint(input)];
    for token in program.into_inner() {
        if token.as_rule() == Rule::EOI {
            break;
        }
        let word_number = terms.len();
        let inner = token.into_inner().next().unwrap();
        let span = inner.as_span();
        let term = match inner.as_rule() {
            Rule::string => {
                let text = inner.into_inner().next().unwrap().as_str().to_owned();
                Term::new(word_number, Some(TermKind::StringLiteral), text, span)
            }
            Rule::word => {
                let word = span.as_str();
                Term::new(word_number, word_to_kind(word), word.to_owned(), span)
            }
            _ => unreachable!(),
        };
        terms.push(term);
    }
    Ok(terms)
}
