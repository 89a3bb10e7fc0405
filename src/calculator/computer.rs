use crate::ast::{CaseWhenElseFunction, CastFunction, Function, MathExpressionAtom};
use crate::translator::{self, CompileError};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::any::Any;
use std::sync::{Arc, Weak};

/// Shape of a cacheable top-level node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    CaseWhen,
    Cast,
    Function,
    Math,
}

/// Identity of a shared node: its shape and the address of its allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey {
    pub kind: SourceKind,
    pub addr: usize,
}

/// A shared top-level node that can be compiled into a script.
#[derive(Debug, Clone)]
pub enum ScriptSource {
    CaseWhen(Arc<CaseWhenElseFunction>),
    Cast(Arc<CastFunction>),
    Function(Arc<Function>),
    Math(Arc<MathExpressionAtom>),
}

impl ScriptSource {
    pub const fn kind(&self) -> SourceKind {
        match self {
            Self::CaseWhen(_) => SourceKind::CaseWhen,
            Self::Cast(_) => SourceKind::Cast,
            Self::Function(_) => SourceKind::Function,
            Self::Math(_) => SourceKind::Math,
        }
    }

    pub fn key(&self) -> NodeKey {
        let addr = match self {
            Self::CaseWhen(v) => Arc::as_ptr(v) as *const () as usize,
            Self::Cast(v) => Arc::as_ptr(v) as *const () as usize,
            Self::Function(v) => Arc::as_ptr(v) as *const () as usize,
            Self::Math(v) => Arc::as_ptr(v) as *const () as usize,
        };
        NodeKey {
            kind: self.kind(),
            addr,
        }
    }

    /// Weak handle keeping the allocation (not the node) alive, so the
    /// address in [`NodeKey`] cannot be handed to another node meanwhile.
    pub fn anchor(&self) -> Weak<dyn Any + Send + Sync> {
        match self {
            Self::CaseWhen(v) => weak_anchor(v),
            Self::Cast(v) => weak_anchor(v),
            Self::Function(v) => weak_anchor(v),
            Self::Math(v) => weak_anchor(v),
        }
    }

    /// Run the translator over the node.
    pub fn translate(&self) -> Result<String, CompileError> {
        let mut sb = String::new();
        match self {
            Self::CaseWhen(v) => translator::translate_case_when(&mut sb, v)?,
            Self::Cast(v) => translator::translate_cast(&mut sb, v)?,
            Self::Function(v) => translator::translate_function(&mut sb, v)?,
            Self::Math(v) => translator::translate_math(&mut sb, v)?,
        }
        Ok(sb)
    }
}

fn weak_anchor<T: Any + Send + Sync>(node: &Arc<T>) -> Weak<dyn Any + Send + Sync> {
    let weak: Weak<T> = Arc::downgrade(node);
    weak
}

impl From<Arc<CaseWhenElseFunction>> for ScriptSource {
    fn from(v: Arc<CaseWhenElseFunction>) -> Self {
        Self::CaseWhen(v)
    }
}

impl From<Arc<CastFunction>> for ScriptSource {
    fn from(v: Arc<CastFunction>) -> Self {
        Self::Cast(v)
    }
}

impl From<Arc<Function>> for ScriptSource {
    fn from(v: Arc<Function>) -> Self {
        Self::Function(v)
    }
}

impl From<Arc<MathExpressionAtom>> for ScriptSource {
    fn from(v: Arc<MathExpressionAtom>) -> Self {
        Self::Math(v)
    }
}

/// Compiles one node into its script exactly once.
///
/// The first caller of [`compute`](Self::compute) takes the source out of
/// its slot and runs the translator; concurrent callers block until that run
/// finishes. Every later call returns the same script, or the same error.
pub struct ScriptComputer {
    source: Mutex<Option<ScriptSource>>,
    result: OnceCell<Result<Arc<str>, CompileError>>,
}

impl ScriptComputer {
    pub fn new(source: ScriptSource) -> Self {
        Self {
            source: Mutex::new(Some(source)),
            result: OnceCell::new(),
        }
    }

    pub fn compute(&self) -> Result<Arc<str>, CompileError> {
        self.compute_with(|| {})
    }

    /// Like [`compute`](Self::compute), calling `on_compile` when this call
    /// is the one that runs the translator.
    pub fn compute_with(&self, on_compile: impl FnOnce()) -> Result<Arc<str>, CompileError> {
        self.result
            .get_or_init(|| {
                on_compile();

                // a previous run unwound after taking the source
                let Some(source) = self.source.lock().take() else {
                    return Err(CompileError::SourceReleased);
                };

                match source.translate() {
                    Ok(script) => {
                        log::debug!("Compiled {:?} node into script: {script}", source.kind());
                        Ok(Arc::from(script))
                    }
                    Err(err) if err.is_column_reference() => {
                        log::trace!("{:?} node references a column", source.kind());
                        Err(err)
                    }
                    Err(err) => {
                        log::debug!("Failed to compile {:?} node: {err}", source.kind());
                        Err(err)
                    }
                }
            })
            .clone()
    }

    /// Whether the translator has already run.
    pub fn is_computed(&self) -> bool {
        self.result.get().is_some()
    }

    /// Whether the source node is still held.
    pub fn holds_source(&self) -> bool {
        self.source.lock().is_some()
    }
}

impl std::fmt::Debug for ScriptComputer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptComputer")
            .field("result", &self.result.get())
            .finish_non_exhaustive()
    }
}
