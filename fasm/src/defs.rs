use crate::new_parser_error;
use crate::term::{Term, TermKind};
use crate::{Context, Result};
use fcpu::Word;

/// Variables are allocated upwards from here, one cell each plus whatever
/// `allot` reserves.
pub const VARIABLE_BASE: Word = 512;

const ALLOT_MIN: Word = 1;
const ALLOT_MAX: Word = 100;

/// Registers `: name ... ;` and `:intr name ... ;` definitions. The function
/// table points at the first body term; the definition header receives the
/// index just past the closing `;` so lowering can jump over the body.
pub fn assign_functions(terms: &mut [Term], context: &mut Context) -> Result<()> {
    let mut open: Vec<usize> = Vec::new();
    for index in 0..terms.len() {
        match terms[index].kind {
            Some(TermKind::Def) | Some(TermKind::DefIntr) => {
                if index + 1 >= terms.len() {
                    return Err(new_parser_error(
                        terms[index].span.clone(),
                        "missing function name".to_owned(),
                    ));
                }
                if !open.is_empty() {
                    return Err(new_parser_error(
                        terms[index].span.clone(),
                        "nested function definition".to_owned(),
                    ));
                }
                if terms[index + 1].kind.is_some() {
                    return Err(new_parser_error(
                        terms[index + 1].span.clone(),
                        "function name shadows a built-in word".to_owned(),
                    ));
                }
                let name = terms[index + 1].text.clone();
                if context.functions.contains_key(&name) {
                    return Err(new_parser_error(
                        terms[index + 1].span.clone(),
                        format!("function \"{}\" is already defined", name),
                    ));
                }
                context.functions.insert(name, terms[index].word_number + 1);
                terms[index + 1].converted = true;
                open.push(index);
            }
            Some(TermKind::Ret) => {
                let def = open.pop().ok_or_else(|| {
                    new_parser_error(
                        terms[index].span.clone(),
                        "; outside a function definition".to_owned(),
                    )
                })?;
                terms[def].operand = Some(terms[index].word_number + 1);
            }
            _ => {}
        }
    }
    if let Some(&index) = open.first() {
        return Err(new_parser_error(
            terms[index].span.clone(),
            "unterminated function definition".to_owned(),
        ));
    }
    Ok(())
}

/// Handles `variable name` and the optional `variable name N allot` form.
pub fn assign_variables(terms: &mut [Term], context: &mut Context) -> Result<()> {
    for index in 0..terms.len() {
        if terms[index].kind != Some(TermKind::Variable) {
            continue;
        }
        if index + 1 >= terms.len() {
            return Err(new_parser_error(
                terms[index].span.clone(),
                "missing variable name".to_owned(),
            ));
        }
        if terms[index + 1].kind.is_some() {
            return Err(new_parser_error(
                terms[index + 1].span.clone(),
                "variable name shadows a built-in word".to_owned(),
            ));
        }
        let starts_alphabetic = terms[index + 1]
            .text
            .chars()
            .next()
            .map_or(false, char::is_alphabetic);
        if !starts_alphabetic {
            return Err(new_parser_error(
                terms[index + 1].span.clone(),
                "variable name must start with a letter".to_owned(),
            ));
        }
        let name = terms[index + 1].text.clone();
        if context.variables.contains_key(&name) {
            return Err(new_parser_error(
                terms[index + 1].span.clone(),
                format!("variable \"{}\" already exists", name),
            ));
        }
        context.variables.insert(name, context.variable_address);
        context.variable_address += 1;
        terms[index + 1].converted = true;

        if index + 3 < terms.len() && terms[index + 3].kind == Some(TermKind::Allot) {
            allot(terms, index + 3, context)?;
        }
    }
    Ok(())
}

fn allot(terms: &mut [Term], index: usize, context: &mut Context) -> Result<()> {
    let size_term = &mut terms[index - 1];
    size_term.converted = true;
    let size: Word = size_term.text.parse().map_err(|_| {
        new_parser_error(size_term.span.clone(), "invalid allot size".to_owned())
    })?;
    if size < ALLOT_MIN || size > ALLOT_MAX {
        return Err(new_parser_error(
            terms[index - 1].span.clone(),
            format!("allot size must be between {} and {}", ALLOT_MIN, ALLOT_MAX),
        ));
    }
    context.variable_address += size;
    Ok(())
}

/// Rewrites the remaining unknown words: variable references become their
/// address literal, function references become calls. Whatever is left is
/// assumed numeric and checked at lowering.
pub fn resolve_names(terms: &mut [Term], context: &Context) {
    for term in terms.iter_mut() {
        if term.kind.is_none() && !term.converted {
            if let Some(&address) = context.variables.get(&term.text) {
                term.text = address.to_string();
            }
        }
    }
    for term in terms.iter_mut() {
        if term.kind.is_none() && !term.converted {
            if let Some(&target) = context.functions.get(&term.text) {
                term.operand = Some(target);
                term.kind = Some(TermKind::Call);
            }
        }
    }
}
