use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use carve_core::{CancellationToken, TextRange};
use carve_refactor::{
    compute_offers, AllRefactorings, ConstantValue, RefactoringFilter, RefactoringId,
    RefactoringOffer, SemanticModel, SemanticProvider, TypeCategory,
};
use carve_syntax::{ast, parse, AstNode, SyntaxNode};
use carve_test_utils::extract_span;

/// Semantic model answering from fixed tables, counting every query.
#[derive(Debug, Default)]
pub struct StubModel {
    /// Type names that admit `null`; every other named type is a value type.
    pub reference_types: Vec<&'static str>,
    /// Constant values keyed by expression text.
    pub constants: HashMap<&'static str, ConstantValue>,
    /// Parameter names by argument position.
    pub parameters: Vec<&'static str>,
    pub lambda_returns_void: Option<bool>,
    pub queries: Cell<usize>,
}

impl StubModel {
    fn query(&self) {
        self.queries.set(self.queries.get() + 1);
    }

    fn parameter_at(&self, argument: &ast::Argument) -> Option<String> {
        let position = argument
            .argument_list()?
            .arguments()
            .position(|other| &other == argument)?;
        self.parameters.get(position).map(|name| name.to_string())
    }
}

impl SemanticModel for StubModel {
    fn type_category(&self, ty: &ast::Type) -> TypeCategory {
        self.query();
        let name = ty.syntax().to_string();
        if self.reference_types.contains(&name.as_str()) {
            TypeCategory::Reference
        } else {
            TypeCategory::Value
        }
    }

    fn constant_value(&self, expr: &ast::Expression) -> Option<ConstantValue> {
        self.query();
        self.constants.get(expr.syntax().to_string().as_str()).cloned()
    }

    fn parameter_name(&self, argument: &ast::Argument) -> Option<String> {
        self.query();
        match argument.name_colon() {
            Some(name_colon) => name_colon
                .name()
                .filter(|name| self.parameters.contains(&name.as_str())),
            None => self.parameter_at(argument),
        }
    }

    fn positional_parameter_name(&self, argument: &ast::Argument) -> Option<String> {
        self.query();
        self.parameter_at(argument)
    }

    fn lambda_returns_void(&self, _: &ast::LambdaExpression) -> Option<bool> {
        self.query();
        self.lambda_returns_void
    }
}

/// A provider handing out `model`, counting how often it runs.
pub fn provider_for(model: Rc<StubModel>, runs: Rc<Cell<usize>>) -> SemanticProvider<'static> {
    Box::new(move || {
        runs.set(runs.get() + 1);
        Ok(model as Rc<dyn SemanticModel>)
    })
}

/// A parsed fixture and the span its markers selected.
pub struct Request {
    pub text: String,
    pub root: SyntaxNode,
    pub span: TextRange,
}

impl Request {
    pub fn new(fixture: &str) -> Self {
        let (text, span) = extract_span(fixture);
        let parse = parse(&text);
        assert!(parse.ok(), "fixture has syntax errors: {:?}", parse.errors);
        Self {
            root: parse.syntax(),
            text,
            span,
        }
    }

    pub fn offers(&self) -> Vec<RefactoringOffer> {
        self.offers_with(&AllRefactorings, Rc::new(StubModel::default()))
    }

    pub fn offers_with_model(&self, model: StubModel) -> Vec<RefactoringOffer> {
        self.offers_with(&AllRefactorings, Rc::new(model))
    }

    pub fn offers_with(
        &self,
        filter: &dyn RefactoringFilter,
        model: Rc<StubModel>,
    ) -> Vec<RefactoringOffer> {
        let runs = Rc::new(Cell::new(0));
        compute_offers(
            &self.root,
            self.span,
            filter,
            provider_for(model, runs),
            &CancellationToken::new(),
        )
        .expect("request should not fail")
    }
}

pub fn titles(offers: &[RefactoringOffer]) -> Vec<&str> {
    offers.iter().map(|offer| offer.title()).collect()
}

pub fn ids(offers: &[RefactoringOffer]) -> Vec<RefactoringId> {
    offers.iter().map(|offer| offer.id()).collect()
}

/// Applies the first offer with `id` and returns the edited document.
pub fn apply(offers: Vec<RefactoringOffer>, id: RefactoringId) -> String {
    let offer = offers
        .into_iter()
        .find(|offer| offer.id() == id)
        .unwrap_or_else(|| panic!("no offer for {id}"));
    let edit = offer
        .apply(&CancellationToken::new())
        .expect("action should succeed");
    edit.apply().expect("edit should apply").to_string()
}

/// `fixture` with the refactoring `id` applied at its marked span.
pub fn check(fixture: &str, id: RefactoringId) -> String {
    let request = Request::new(fixture);
    apply(request.offers(), id)
}

/// Like [`check`], with a semantic model.
pub fn check_with_model(fixture: &str, model: StubModel, id: RefactoringId) -> String {
    let request = Request::new(fixture);
    apply(request.offers_with_model(model), id)
}

pub fn assert_not_offered(fixture: &str, id: RefactoringId) {
    let request = Request::new(fixture);
    let offers = request.offers();
    assert!(
        !ids(&offers).contains(&id),
        "{id} unexpectedly offered; got {:?}",
        titles(&offers)
    );
}
