use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortItem {
    pub order: SortOrder,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "items", rename_all = "camelCase")]
pub enum SortExpr {
    Sort(Vec<SortItem>),
    Random,
    /// Replaced by the adapter's default ordering during resolution.
    Default,
}

/// Parse a sort string: `sort=+title,-year`, `random`, `default` or empty.
pub fn parse_sort(s: &str) -> Result<SortExpr, FilterError> {
    let (mode, args) = match s.split_once('=') {
        Some((mode, args)) => (mode.trim(), Some(args)),
        None => (s.trim(), None),
    };

    match mode {
        "sort" => {
            let args = args.ok_or(FilterError::EmptySort)?;
            args.split(',')
                .map(|arg| parse_item(arg.trim()))
                .collect::<Result<Vec<_>, _>>()
                .map(SortExpr::Sort)
        }
        "random" => Ok(SortExpr::Random),
        "" | "default" => Ok(SortExpr::Default),
        other => Err(FilterError::UnknownSortMode(other.to_string())),
    }
}

fn parse_item(arg: &str) -> Result<SortItem, FilterError> {
    let (order, name) = if let Some(name) = arg.strip_prefix('+') {
        (SortOrder::Asc, name)
    } else if let Some(name) = arg.strip_prefix('-') {
        (SortOrder::Desc, name)
    } else {
        (SortOrder::Asc, arg)
    };

    if name.is_empty() {
        return Err(FilterError::EmptySort);
    }

    Ok(SortItem {
        order,
        name: name.to_string(),
    })
}

impl FromStr for SortExpr {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_sort(s)
    }
}
