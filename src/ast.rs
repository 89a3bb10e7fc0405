//! Expression shapes produced by the SQL parser.
//!
//! The nodes are immutable once built. Only the shapes that can appear inside a
//! constant-foldable function expression are modelled here.

use crate::value::Value;
use std::time::Duration;

/// Leaf or near-leaf expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionAtom {
    Math(MathExpressionAtom),
    Constant(ConstantExpressionAtom),
    ColumnName(ColumnNameExpressionAtom),
    Variable(VariableExpressionAtom),
    Unary(UnaryExpressionAtom),
    Nested(NestedExpressionAtom),
    Interval(IntervalExpressionAtom),
    FunctionCall(FunctionCallExpressionAtom),
    SystemVariable(SystemVariableExpressionAtom),
}

impl ExpressionAtom {
    pub fn constant(value: impl Into<Value>) -> Self {
        Self::Constant(ConstantExpressionAtom(value.into()))
    }

    pub const fn variable(n: usize) -> Self {
        Self::Variable(VariableExpressionAtom(n))
    }

    pub fn column(name: &str) -> Self {
        Self::ColumnName(ColumnNameExpressionAtom(vec![name.to_string()]))
    }

    pub fn math(left: Self, operator: &str, right: Self) -> Self {
        Self::Math(MathExpressionAtom::new(left, operator, right))
    }

    pub fn nested(inner: ExpressionNode) -> Self {
        Self::Nested(NestedExpressionAtom {
            first: Box::new(inner),
        })
    }

    pub fn function(function: Function) -> Self {
        Self::FunctionCall(FunctionCallExpressionAtom(Box::new(FunctionCall::Function(
            function,
        ))))
    }

    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Math(_) => "MathExpressionAtom",
            Self::Constant(_) => "ConstantExpressionAtom",
            Self::ColumnName(_) => "ColumnNameExpressionAtom",
            Self::Variable(_) => "VariableExpressionAtom",
            Self::Unary(_) => "UnaryExpressionAtom",
            Self::Nested(_) => "NestedExpressionAtom",
            Self::Interval(_) => "IntervalExpressionAtom",
            Self::FunctionCall(_) => "FunctionCallExpressionAtom",
            Self::SystemVariable(_) => "SystemVariableExpressionAtom",
        }
    }
}

/// `left <operator> right`, e.g. `2 + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct MathExpressionAtom {
    pub left: Box<ExpressionAtom>,
    pub operator: String,
    pub right: Box<ExpressionAtom>,
}

impl MathExpressionAtom {
    pub fn new(left: ExpressionAtom, operator: &str, right: ExpressionAtom) -> Self {
        Self {
            left: Box::new(left),
            operator: operator.to_string(),
            right: Box::new(right),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstantExpressionAtom(pub Value);

impl ConstantExpressionAtom {
    pub const fn value(&self) -> &Value {
        &self.0
    }
}

impl std::fmt::Display for ConstantExpressionAtom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A possibly qualified column reference, e.g. `t.uid`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnNameExpressionAtom(pub Vec<String>);

impl std::fmt::Display for ColumnNameExpressionAtom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let quoted: Vec<String> = self.0.iter().map(|part| format!("`{part}`")).collect();
        write!(f, "{}", quoted.join("."))
    }
}

/// Positional placeholder (`?`) bound by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableExpressionAtom(pub usize);

impl VariableExpressionAtom {
    pub const fn n(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpressionAtom {
    pub operator: String,
    pub inner: UnaryOperand,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UnaryOperand {
    Atom(Box<ExpressionAtom>),
    Comparison(BinaryComparisonPredicateNode),
}

/// Parenthesized expression.
#[derive(Debug, Clone, PartialEq)]
pub struct NestedExpressionAtom {
    pub first: Box<ExpressionNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalUnit {
    Microsecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl IntervalUnit {
    pub const fn duration(self) -> Duration {
        const DAY: u64 = 24 * 60 * 60;
        match self {
            Self::Microsecond => Duration::from_micros(1),
            Self::Second => Duration::from_secs(1),
            Self::Minute => Duration::from_secs(60),
            Self::Hour => Duration::from_secs(60 * 60),
            Self::Day => Duration::from_secs(DAY),
            Self::Week => Duration::from_secs(7 * DAY),
            Self::Month => Duration::from_secs(30 * DAY),
            Self::Quarter => Duration::from_secs(90 * DAY),
            Self::Year => Duration::from_secs(365 * DAY),
        }
    }
}

impl std::fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Microsecond => "MICROSECOND",
            Self::Second => "SECOND",
            Self::Minute => "MINUTE",
            Self::Hour => "HOUR",
            Self::Day => "DAY",
            Self::Week => "WEEK",
            Self::Month => "MONTH",
            Self::Quarter => "QUARTER",
            Self::Year => "YEAR",
        };
        write!(f, "{name}")
    }
}

/// `INTERVAL <value> <unit>`.
///
/// The duration is fixed when the node is built: one unit for `new`, or an
/// arbitrary width for literals the parser already folded (`INTERVAL '5' SECOND`
/// applied to a column offset, for example).
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalExpressionAtom {
    pub value: Box<PredicateNode>,
    pub unit: IntervalUnit,
    duration: Duration,
}

impl IntervalExpressionAtom {
    pub fn new(value: PredicateNode, unit: IntervalUnit) -> Self {
        Self {
            value: Box::new(value),
            unit,
            duration: unit.duration(),
        }
    }

    pub fn with_duration(value: PredicateNode, unit: IntervalUnit, duration: Duration) -> Self {
        Self {
            value: Box::new(value),
            unit,
            duration,
        }
    }

    pub const fn duration(&self) -> Duration {
        self.duration
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCallExpressionAtom(pub Box<FunctionCall>);

/// `@@name` or `@@session.name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemVariableExpressionAtom {
    pub name: String,
    pub global: bool,
}

/// The callee shapes a function-call atom can wrap.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionCall {
    Function(Function),
    Aggregate(AggrFunction),
    Cast(CastFunction),
    CaseWhen(CaseWhenElseFunction),
    Window(WindowFunction),
}

impl FunctionCall {
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Function(_) => "Function",
            Self::Aggregate(_) => "AggrFunction",
            Self::Cast(_) => "CastFunction",
            Self::CaseWhen(_) => "CaseWhenElseFunction",
            Self::Window(_) => "WindowFunction",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PredicateNode {
    Atom(AtomPredicateNode),
    BinaryComparison(BinaryComparisonPredicateNode),
    Like(LikePredicateNode),
    In(InPredicateNode),
}

impl PredicateNode {
    pub const fn atom(atom: ExpressionAtom) -> Self {
        Self::Atom(AtomPredicateNode { atom })
    }

    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Atom(_) => "AtomPredicateNode",
            Self::BinaryComparison(_) => "BinaryComparisonPredicateNode",
            Self::Like(_) => "LikePredicateNode",
            Self::In(_) => "InPredicateNode",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AtomPredicateNode {
    pub atom: ExpressionAtom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryComparisonPredicateNode {
    pub left: Box<PredicateNode>,
    pub op: Comparison,
    pub right: Box<PredicateNode>,
}

impl BinaryComparisonPredicateNode {
    pub fn new(left: ExpressionAtom, op: Comparison, right: ExpressionAtom) -> Self {
        Self {
            left: Box::new(PredicateNode::atom(left)),
            op,
            right: Box::new(PredicateNode::atom(right)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LikePredicateNode {
    pub left: Box<PredicateNode>,
    pub right: Box<PredicateNode>,
    pub not: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InPredicateNode {
    pub target: Box<PredicateNode>,
    pub values: Vec<ExpressionNode>,
    pub not: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    NullSafeEq,
}

/// SQL spelling of the operator.
impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::NullSafeEq => "<=>",
        };
        write!(f, "{symbol}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionNode {
    Predicate(PredicateNode),
    Logical(LogicalExpressionNode),
    Not(NotExpressionNode),
}

impl ExpressionNode {
    /// Shorthand for the common `predicate(atom(...))` wrapping.
    pub const fn atom(atom: ExpressionAtom) -> Self {
        Self::Predicate(PredicateNode::atom(atom))
    }

    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Predicate(_) => "PredicateExpressionNode",
            Self::Logical(_) => "LogicalExpressionNode",
            Self::Not(_) => "NotExpressionNode",
        }
    }

    /// The wrapped atom when the expression is a bare atom predicate.
    pub const fn as_atom(&self) -> Option<&ExpressionAtom> {
        match self {
            Self::Predicate(PredicateNode::Atom(p)) => Some(&p.atom),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogicalExpressionNode {
    pub op: LogicalOperator,
    pub left: Box<ExpressionNode>,
    pub right: Box<ExpressionNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotExpressionNode {
    pub inner: Box<ExpressionNode>,
}

/// A plain (scalar) function call such as `CONCAT(a, b)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub args: Vec<FunctionArg>,
}

impl Function {
    pub fn new(name: &str, args: Vec<FunctionArg>) -> Self {
        Self {
            name: name.to_string(),
            args,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggrFunction {
    pub name: String,
    pub args: Vec<FunctionArg>,
    pub distinct: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowFunction {
    pub name: String,
    pub args: Vec<FunctionArg>,
    pub partition_by: Vec<ExpressionNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FunctionArg {
    Column(ColumnNameExpressionAtom),
    Constant(Value),
    Expression(ExpressionNode),
    Function(Function),
    Cast(CastFunction),
    CaseWhen(CaseWhenElseFunction),
}

impl FunctionArg {
    pub fn constant(value: impl Into<Value>) -> Self {
        Self::Constant(value.into())
    }

    pub fn column(name: &str) -> Self {
        Self::Column(ColumnNameExpressionAtom(vec![name.to_string()]))
    }

    pub const fn atom(atom: ExpressionAtom) -> Self {
        Self::Expression(ExpressionNode::atom(atom))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastType {
    Binary,
    NChar,
    Char,
    Date,
    DateTime,
    Decimal,
    Json,
    Signed,
    SignedInteger,
    Time,
    Unsigned,
    UnsignedInteger,
}

impl std::fmt::Display for CastType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Binary => "BINARY",
            Self::NChar => "NCHAR",
            Self::Char => "CHAR",
            Self::Date => "DATE",
            Self::DateTime => "DATETIME",
            Self::Decimal => "DECIMAL",
            Self::Json => "JSON",
            Self::Signed => "SIGNED",
            Self::SignedInteger => "SIGNED INTEGER",
            Self::Time => "TIME",
            Self::Unsigned => "UNSIGNED",
            Self::UnsignedInteger => "UNSIGNED INTEGER",
        };
        write!(f, "{name}")
    }
}

/// Target type of `CAST(x AS <type>)` with its optional size and charset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertDataType {
    pub kind: CastType,
    pub dimension0: Option<i64>,
    pub dimension1: Option<i64>,
    pub charset: Option<String>,
}

impl ConvertDataType {
    pub const fn new(kind: CastType) -> Self {
        Self {
            kind,
            dimension0: None,
            dimension1: None,
            charset: None,
        }
    }

    #[must_use]
    pub fn with_dimensions(mut self, d0: i64, d1: Option<i64>) -> Self {
        self.dimension0 = Some(d0);
        self.dimension1 = d1;
        self
    }

    #[must_use]
    pub fn with_charset(mut self, charset: &str) -> Self {
        self.charset = Some(charset.to_string());
        self
    }

    /// Size arguments, 0 where unspecified.
    pub fn dimensions(&self) -> (i64, i64) {
        (
            self.dimension0.unwrap_or_default(),
            self.dimension1.unwrap_or_default(),
        )
    }

    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastTarget {
    /// `CAST(x AS <type>)`
    Type(ConvertDataType),
    /// `CONVERT(x USING <charset>)`
    Charset(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CastFunction {
    pub target: CastTarget,
    pub source: ExpressionNode,
}

impl CastFunction {
    pub const fn new(target: CastTarget, source: ExpressionNode) -> Self {
        Self { target, source }
    }

    pub const fn cast(&self) -> Option<&ConvertDataType> {
        match &self.target {
            CastTarget::Type(t) => Some(t),
            CastTarget::Charset(_) => None,
        }
    }
}

/// `CASE [subject] WHEN .. THEN .. [ELSE ..] END`.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseWhenElseFunction {
    pub case: Option<ExpressionNode>,
    pub branches: Vec<(FunctionArg, FunctionArg)>,
    pub else_value: Option<Box<FunctionArg>>,
}
