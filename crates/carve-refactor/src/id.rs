use std::fmt;
use std::str::FromStr;

/// Stable identifier of one refactoring kind.
///
/// The snake_case key returned by [`RefactoringId::as_str`] is what
/// configuration files match against; it never changes once published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RefactoringId {
    AddBracesToSwitchSections,
    RemoveBracesFromSwitchSections,
    AddBracesToSwitchSection,
    RemoveBracesFromSwitchSection,
    ConvertHexadecimalLiteralToDecimalLiteral,
    ConvertDecimalLiteralToHexadecimalLiteral,
    NegateBooleanLiteral,
    AddArgumentName,
    RemoveArgumentName,
    ReplaceCastWithAs,
    ReplaceExpressionWithConstantValue,
    UseExpressionBodiedLambda,
    UseBlockBodiedLambda,
    UseExpressionBodiedMethod,
    SimplifyConditionalExpression,
    InvertConditionalExpression,
    AddBraces,
    RemoveBraces,
    SwapBinaryOperands,
    RemoveParentheses,
    WrapInCondition,
    WrapInTryCatch,
}

impl RefactoringId {
    pub const ALL: [RefactoringId; 22] = [
        RefactoringId::AddBracesToSwitchSections,
        RefactoringId::RemoveBracesFromSwitchSections,
        RefactoringId::AddBracesToSwitchSection,
        RefactoringId::RemoveBracesFromSwitchSection,
        RefactoringId::ConvertHexadecimalLiteralToDecimalLiteral,
        RefactoringId::ConvertDecimalLiteralToHexadecimalLiteral,
        RefactoringId::NegateBooleanLiteral,
        RefactoringId::AddArgumentName,
        RefactoringId::RemoveArgumentName,
        RefactoringId::ReplaceCastWithAs,
        RefactoringId::ReplaceExpressionWithConstantValue,
        RefactoringId::UseExpressionBodiedLambda,
        RefactoringId::UseBlockBodiedLambda,
        RefactoringId::UseExpressionBodiedMethod,
        RefactoringId::SimplifyConditionalExpression,
        RefactoringId::InvertConditionalExpression,
        RefactoringId::AddBraces,
        RefactoringId::RemoveBraces,
        RefactoringId::SwapBinaryOperands,
        RefactoringId::RemoveParentheses,
        RefactoringId::WrapInCondition,
        RefactoringId::WrapInTryCatch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RefactoringId::AddBracesToSwitchSections => "add_braces_to_switch_sections",
            RefactoringId::RemoveBracesFromSwitchSections => "remove_braces_from_switch_sections",
            RefactoringId::AddBracesToSwitchSection => "add_braces_to_switch_section",
            RefactoringId::RemoveBracesFromSwitchSection => "remove_braces_from_switch_section",
            RefactoringId::ConvertHexadecimalLiteralToDecimalLiteral => {
                "convert_hexadecimal_literal_to_decimal_literal"
            }
            RefactoringId::ConvertDecimalLiteralToHexadecimalLiteral => {
                "convert_decimal_literal_to_hexadecimal_literal"
            }
            RefactoringId::NegateBooleanLiteral => "negate_boolean_literal",
            RefactoringId::AddArgumentName => "add_argument_name",
            RefactoringId::RemoveArgumentName => "remove_argument_name",
            RefactoringId::ReplaceCastWithAs => "replace_cast_with_as",
            RefactoringId::ReplaceExpressionWithConstantValue => {
                "replace_expression_with_constant_value"
            }
            RefactoringId::UseExpressionBodiedLambda => "use_expression_bodied_lambda",
            RefactoringId::UseBlockBodiedLambda => "use_block_bodied_lambda",
            RefactoringId::UseExpressionBodiedMethod => "use_expression_bodied_method",
            RefactoringId::SimplifyConditionalExpression => "simplify_conditional_expression",
            RefactoringId::InvertConditionalExpression => "invert_conditional_expression",
            RefactoringId::AddBraces => "add_braces",
            RefactoringId::RemoveBraces => "remove_braces",
            RefactoringId::SwapBinaryOperands => "swap_binary_operands",
            RefactoringId::RemoveParentheses => "remove_parentheses",
            RefactoringId::WrapInCondition => "wrap_in_condition",
            RefactoringId::WrapInTryCatch => "wrap_in_try_catch",
        }
    }

    /// Every configuration key, in declaration order.
    pub fn all_keys() -> Vec<&'static str> {
        Self::ALL.iter().map(|id| id.as_str()).collect()
    }
}

impl fmt::Display for RefactoringId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown refactoring id `{0}`")]
pub struct UnknownRefactoringId(pub String);

impl FromStr for RefactoringId {
    type Err = UnknownRefactoringId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownRefactoringId(s.to_string()))
    }
}
