use serde::{Deserialize, Serialize};

/// Who we are researching: the prospect and their company.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryContext {
    pub prospect_name: String,
    pub company_name: String,
    pub sales_rep: SalesRep,
}

impl QueryContext {
    pub fn new(prospect_name: impl Into<String>, company_name: impl Into<String>) -> Self {
        Self {
            prospect_name: prospect_name.into(),
            company_name: company_name.into(),
            sales_rep: SalesRep::default(),
        }
    }

    pub fn with_sales_rep(mut self, rep: SalesRep) -> Self {
        self.sales_rep = rep;
        self
    }
}

/// The rep the outreach is written on behalf of.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SalesRep {
    pub name: String,
    pub title: String,
}

impl SalesRep {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
        }
    }
}

impl Default for SalesRep {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            title: "Senior Account Executive".to_string(),
        }
    }
}
