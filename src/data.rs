use crate::errors::CartError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::fs;

/// A single attribute value observed in tabular data.
///
/// Fields that parse as a float are numeric, everything else is kept as a
/// categorical token. The variant decides how a [`Question`](crate::splitter::Question)
/// built from the value compares it: numeric values by `>=`, categorical
/// values by equality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    Numeric(f64),
    Categorical(String),
}

impl AttributeValue {
    /// Parse a raw text field into an attribute value.
    pub fn parse(field: &str) -> Self {
        match field.parse::<f64>() {
            Ok(v) => AttributeValue::Numeric(v),
            Err(_) => AttributeValue::Categorical(field.to_string()),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, AttributeValue::Numeric(_))
    }
}

impl Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AttributeValue::Numeric(v) => write!(f, "{}", v),
            AttributeValue::Categorical(s) => write!(f, "{}", s),
        }
    }
}

/// One labeled row: an ordered attribute vector plus its trailing class label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    pub attributes: Vec<AttributeValue>,
    pub label: String,
}

impl Instance {
    pub fn new(attributes: Vec<AttributeValue>, label: impl Into<String>) -> Self {
        Instance {
            attributes,
            label: label.into(),
        }
    }
}

/// A non-empty, width-validated collection of labeled instances.
///
/// Emptiness and ragged widths are rejected at construction, so every
/// consumer downstream can rely on a fixed attribute dimensionality.
#[derive(Debug, Clone)]
pub struct Dataset {
    instances: Vec<Instance>,
    n_attributes: usize,
}

impl Dataset {
    /// Create a dataset from labeled instances.
    ///
    /// * `instances` - The rows of the dataset. Every row must carry the same
    ///   number of attributes, and at least one.
    pub fn new(instances: Vec<Instance>) -> Result<Self, CartError> {
        let n_attributes = match instances.first() {
            Some(first) => first.attributes.len(),
            None => return Err(CartError::EmptyDataset),
        };
        if n_attributes == 0 {
            return Err(CartError::NoAttributes);
        }
        for (i, instance) in instances.iter().enumerate() {
            if instance.attributes.len() != n_attributes {
                return Err(CartError::RaggedInstance(i, n_attributes, instance.attributes.len()));
            }
        }
        Ok(Dataset {
            instances,
            n_attributes,
        })
    }

    /// Parse delimited text where each line holds the attribute fields
    /// followed by one trailing class label field. Fields that parse as
    /// floats become numeric attributes; blank lines are skipped.
    pub fn from_delimited(text: &str, sep: char) -> Result<Self, CartError> {
        let mut instances = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(sep).collect();
            let (label, attribute_fields) = fields.split_last().expect("split yields at least one field");
            let attributes = attribute_fields.iter().map(|f| AttributeValue::parse(f)).collect();
            instances.push(Instance::new(attributes, label.trim().to_string()));
        }
        Dataset::new(instances)
    }

    /// Read a delimited text file from disk, see [`Dataset::from_delimited`].
    pub fn read_delimited(path: &str, sep: char) -> Result<Self, CartError> {
        let text = match fs::read_to_string(path) {
            Ok(s) => Ok(s),
            Err(e) => Err(CartError::UnableToRead(e.to_string())),
        }?;
        Self::from_delimited(&text, sep)
    }

    /// Materialize a new dataset holding copies of the selected rows.
    pub fn subset(&self, index: &[usize]) -> Result<Self, CartError> {
        Dataset::new(index.iter().map(|&i| self.instances[i].clone()).collect())
    }

    /// Number of instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Datasets are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Attribute dimensionality, excluding the class label.
    pub fn n_attributes(&self) -> usize {
        self.n_attributes
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn get(&self, row: usize) -> &Instance {
        &self.instances[row]
    }

    /// Class label of one row.
    pub fn label(&self, row: usize) -> &str {
        &self.instances[row].label
    }

    /// A single attribute value of one row.
    pub fn value(&self, row: usize, attribute: usize) -> &AttributeValue {
        &self.instances[row].attributes[attribute]
    }
}
