//! Operator registry storage

use std::collections::HashMap;

use crate::operator::Operator;
use crate::{Error, Result};

/// Operators keyed by name, in the order they were supplied.
///
/// Built once from the caller's operator list and never changed afterwards.
pub struct OperatorRegistry {
    operators: Vec<Box<dyn Operator>>,
    index: HashMap<String, usize>,
}

impl OperatorRegistry {
    /// Build a registry from `operators`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateOperator`] if two operators share a name.
    pub fn new(operators: Vec<Box<dyn Operator>>) -> Result<Self> {
        let mut index = HashMap::with_capacity(operators.len());

        for (position, operator) in operators.iter().enumerate() {
            let name = operator.name().to_string();
            if index.insert(name.clone(), position).is_some() {
                return Err(Error::DuplicateOperator { name });
            }
        }

        Ok(Self { operators, index })
    }

    /// Create a registry with no operators.
    pub fn empty() -> Self {
        Self {
            operators: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Registration position of the named operator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperatorNotFound`] if nothing is registered under
    /// `name`.
    pub fn resolve(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| Error::OperatorNotFound {
                name: name.to_string(),
            })
    }

    /// Operator at a position returned by [`resolve`](Self::resolve).
    ///
    /// # Panics
    ///
    /// Panics if `position` did not come from this registry.
    pub fn operator_mut(&mut self, position: usize) -> &mut dyn Operator {
        self.operators[position].as_mut()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.operators.iter().map(|op| op.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for OperatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorRegistry")
            .field("operators", &self.names())
            .finish()
    }
}
