use carve_syntax::{ast, AstNode, TextRange};

use super::switch_section::{rewrite_sections, SectionBraces};
use crate::layout::indent_unit;
use crate::{span, DispatchContext, RefactorError, RefactoringId};

const IDS: &[RefactoringId] = &[
    RefactoringId::AddBracesToSwitchSections,
    RefactoringId::RemoveBracesFromSwitchSections,
];

pub(crate) fn dispatch(
    ctx: &mut DispatchContext<'_>,
    switch: &ast::SwitchStatement,
) -> Result<(), RefactorError> {
    if !ctx.is_any_enabled(IDS) {
        return Ok(());
    }
    let Some(targets) = target_sections(ctx.span(), switch) else {
        return Ok(());
    };

    let unit = indent_unit(ctx.root());
    for braces in [SectionBraces::Add, SectionBraces::Remove] {
        let id = braces.batch_id();
        if !ctx.is_enabled(id) {
            continue;
        }
        let eligible: Vec<ast::SwitchSection> = ctx.analyze(|| {
            targets
                .iter()
                .filter(|section| braces.applies(section))
                .cloned()
                .collect()
        });
        if eligible.is_empty() {
            continue;
        }
        let switch = switch.clone();
        ctx.offer(id, braces.batch_title(), switch.syntax().text_range(), move |_| {
            Ok(rewrite_sections(&switch, &eligible, braces, unit))
        });
    }
    Ok(())
}

/// Every section for a caret on the header, otherwise the sections a
/// selection covers completely. A selection cutting through a section
/// selects nothing.
fn target_sections(span: TextRange, switch: &ast::SwitchStatement) -> Option<Vec<ast::SwitchSection>> {
    let (switch_kw, l_brace) = (switch.switch_token()?, switch.l_brace_token()?);
    if span::is_empty_and_contained_in_or_between(span, switch_kw.text_range(), l_brace.text_range())
    {
        return Some(switch.sections().collect());
    }
    if span.is_empty() {
        return None;
    }

    let mut selected = Vec::new();
    for section in switch.sections() {
        let range = section.syntax().text_range();
        if span::is_contained_in(range, span) {
            selected.push(section);
        } else if range.intersect(span).is_some_and(|overlap| !overlap.is_empty()) {
            return None;
        }
    }
    (!selected.is_empty()).then_some(selected)
}
