use filterql_syntax::{BinaryOp, Expr, UnaryOp};

use crate::adapter::{Name, NameKind, ResolverAdapter};
use crate::error::FilterError;
use crate::expr::{FilterExpr, InExpr, InTableExpr, OpKind, Value, ValueList};
use crate::literal;
use crate::sort::{SortExpr, SortItem};

/// Turns generic syntax trees into [`FilterExpr`] / [`SortExpr`] trees using
/// the domain knowledge of an adapter.
///
/// The resolver holds no state besides the adapter, so one instance can be
/// shared by any number of threads.
#[derive(Debug, Clone)]
pub struct Resolver<A> {
    adapter: A,
}

fn op_kind(op: BinaryOp) -> Option<OpKind> {
    let kind = match op {
        BinaryOp::Eq => OpKind::Equal,
        BinaryOp::Neq => OpKind::NotEqual,
        BinaryOp::Rem => OpKind::Like,
        BinaryOp::Gt => OpKind::Greater,
        BinaryOp::Gte => OpKind::GreaterEqual,
        BinaryOp::Lt => OpKind::Lesser,
        BinaryOp::Lte => OpKind::LesserEqual,
        BinaryOp::And | BinaryOp::Or => return None,
    };
    Some(kind)
}

impl<A: ResolverAdapter> Resolver<A> {
    pub fn new(adapter: A) -> Self {
        Self { adapter }
    }

    /// Resolve a filter expression. The first error aborts the whole walk.
    pub fn resolve(&self, expr: &Expr) -> Result<FilterExpr, FilterError> {
        match expr {
            Expr::Binary {
                op: BinaryOp::And,
                left,
                right,
            } => {
                let left = self.resolve(left)?;
                let right = self.resolve(right)?;
                Ok(FilterExpr::and(left, right))
            }
            Expr::Binary {
                op: BinaryOp::Or,
                left,
                right,
            } => {
                let left = self.resolve(left)?;
                let right = self.resolve(right)?;
                Ok(FilterExpr::or(left, right))
            }
            Expr::Binary { op, left, right } => match op_kind(*op) {
                Some(kind) => self.resolve_comparison(*op, kind, left, right),
                None => Err(FilterError::internal(format!(
                    "unsupported binary operator {op}"
                ))),
            },
            Expr::Call { func, args } => {
                let name = literal::ident(func)?;
                tracing::debug!(function = name, args = args.len(), "resolving filter function");
                self.adapter.resolve_function_call(self, name, args)
            }
            Expr::Unary {
                op: UnaryOp::Not,
                expr,
            } => self.resolve(expr)?.negate(),
            Expr::Unary { op, .. } => Err(FilterError::internal(format!(
                "unsupported unary operator {op}"
            ))),
            Expr::Ident(name) => Err(FilterError::UnexpectedIdent(name.clone())),
            Expr::Lit(lit) => Err(FilterError::UnexpectedLiteral(lit.value.clone())),
        }
    }

    /// `field == null` and `field != null` become null tests on nullable
    /// fields. Ordering or `%` against `null` is rejected with
    /// [`FilterError::NullComparison`] instead of being read as `!= null`.
    fn resolve_comparison(
        &self,
        op: BinaryOp,
        kind: OpKind,
        left: &Expr,
        right: &Expr,
    ) -> Result<FilterExpr, FilterError> {
        let name = literal::ident(left)?;

        if matches!(right, Expr::Ident(ident) if ident == "null") {
            let resolved = self.variable(name)?;
            if !resolved.nullable {
                return Err(FilterError::NotNullable(name.to_string()));
            }

            let not = match op {
                BinaryOp::Eq => false,
                BinaryOp::Neq => true,
                other => return Err(FilterError::NullComparison(other.to_string())),
            };

            return Ok(FilterExpr::IsNull {
                name: resolved.name,
                not,
            });
        }

        let (name, value) = self.resolve_name_value(name, right)?;
        Ok(FilterExpr::Op { kind, name, value })
    }

    fn variable(&self, name: &str) -> Result<Name, FilterError> {
        self.adapter.resolve_variable_name(name).ok_or_else(|| {
            tracing::debug!(name, "unknown filter name");
            FilterError::UnknownName(name.to_string())
        })
    }

    /// Resolve `name` and coerce `value` to the field's declared kind.
    fn resolve_name_value(&self, name: &str, value: &Expr) -> Result<(String, Value), FilterError> {
        let resolved = self.variable(name)?;

        let value = match resolved.kind {
            NameKind::String => Value::String(literal::string(value)?),
            NameKind::Number => Value::Number(literal::number(value)?),
        };

        Ok((resolved.name, value))
    }

    /// Membership test through a join table: `id_selector` must appear among
    /// the ids the adapter assigns to the string arguments.
    ///
    /// `name` is the calling function, used in error messages.
    pub fn in_table(
        &self,
        name: &str,
        typ: &str,
        id_selector: &str,
        args: &[Expr],
    ) -> Result<InTableExpr, FilterError> {
        if args.is_empty() {
            return Err(FilterError::MissingArguments(name.to_string()));
        }

        let mut ids = Vec::with_capacity(args.len());
        for arg in args {
            let s = literal::string(arg)?;

            let id = self
                .adapter
                .resolve_name_to_id(typ, &s)
                .ok_or(FilterError::UnknownName(s))?;

            if !id.is_empty() {
                ids.push(id);
            }
        }

        let table = self
            .adapter
            .resolve_table(typ)
            .ok_or_else(|| FilterError::UnknownName(typ.to_string()))?;

        Ok(InTableExpr {
            not: false,
            id_selector: id_selector.to_string(),
            table,
            ids,
        })
    }

    /// Membership test of the field `variable` against literal arguments.
    pub fn in_list(&self, name: &str, variable: &str, args: &[Expr]) -> Result<InExpr, FilterError> {
        if args.is_empty() {
            return Err(FilterError::MissingArguments(name.to_string()));
        }

        let resolved = self.variable(variable)?;
        let values = match resolved.kind {
            NameKind::String => ValueList::Strings(
                args.iter()
                    .map(literal::string)
                    .collect::<Result<_, _>>()?,
            ),
            NameKind::Number => ValueList::Numbers(
                args.iter()
                    .map(literal::number)
                    .collect::<Result<_, _>>()?,
            ),
        };

        Ok(InExpr {
            not: false,
            name: resolved.name,
            values,
        })
    }

    /// Map sort field names to columns, expanding the default ordering.
    pub fn resolve_sort(&self, sort: SortExpr) -> Result<SortExpr, FilterError> {
        match sort {
            SortExpr::Sort(items) => {
                let items = items
                    .into_iter()
                    .map(|item| -> Result<SortItem, FilterError> {
                        let resolved = self.variable(&item.name)?;
                        Ok(SortItem {
                            order: item.order,
                            name: resolved.name,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(SortExpr::Sort(items))
            }
            SortExpr::Random => Ok(SortExpr::Random),
            SortExpr::Default => {
                let (name, order) = self.adapter.default_sort();
                Ok(SortExpr::Sort(vec![SortItem { order, name }]))
            }
        }
    }
}
