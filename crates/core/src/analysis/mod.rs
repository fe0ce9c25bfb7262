//! Constraint evaluation over version sets.
//!
//! A constraint is an `evalexpr` expression over the integer variables
//! `major`, `minor` and `patch`, e.g. `major == 2 && minor <= 17`. It is
//! evaluated once per version; versions for which it is `false` are
//! violations.

use evalexpr::{ContextWithMutableVariables, EvalexprError, HashMapContext, Node, Value};
use thiserror::Error;

use crate::model::{Version, VersionSet};

#[derive(Debug, Error)]
pub enum ConstraintError {
    /// The expression is not syntactically valid.
    #[error("evaluating '{expression}' on '{version}': parsing error: {source}")]
    Parse {
        expression: String,
        version: String,
        #[source]
        source: EvalexprError,
    },

    /// The expression parsed but failed while evaluating against a version.
    #[error("evaluating '{expression}' on '{version}': {source}")]
    Evaluation {
        expression: String,
        version: String,
        #[source]
        source: EvalexprError,
    },

    #[error("'{expression}' did not evaluate to a boolean")]
    NonBoolean { expression: String },
}

/// Return every version in `versions` for which `expression` is false.
///
/// Violations keep the ascending order of `versions`. Any parse or
/// evaluation failure, or a non-boolean result, aborts the whole call.
pub fn find_violations(
    versions: &VersionSet,
    expression: &str,
) -> Result<VersionSet, ConstraintError> {
    let Some(first) = versions.min() else {
        return Ok(VersionSet::default());
    };
    let tree = evalexpr::build_operator_tree(expression).map_err(|source| {
        ConstraintError::Parse {
            expression: expression.to_string(),
            version: first.to_string(),
            source,
        }
    })?;

    let mut violations = Vec::new();
    for version in versions {
        if !holds(&tree, expression, version)? {
            violations.push(version.clone());
        }
    }

    Ok(VersionSet::from_sorted(violations))
}

fn holds(tree: &Node, expression: &str, version: &Version) -> Result<bool, ConstraintError> {
    let evaluation = |source: EvalexprError| ConstraintError::Evaluation {
        expression: expression.to_string(),
        version: version.to_string(),
        source,
    };

    let bindings = [("major", version.major), ("minor", version.minor), ("patch", version.patch)];
    let mut context = HashMapContext::new();
    for (name, value) in bindings {
        context.set_value(name.to_string(), Value::Int(i64::from(value))).map_err(evaluation)?;
    }

    match tree.eval_with_context(&context).map_err(evaluation)? {
        Value::Boolean(result) => {
            log::debug!("'{expression}' on {version}: {result}");
            Ok(result)
        }
        _ => Err(ConstraintError::NonBoolean { expression: expression.to_string() }),
    }
}
