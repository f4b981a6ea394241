use crate::data::{AttributeValue, Dataset};
use crate::errors::CartError;
use crate::metric::accuracy;
use crate::sampler::sample_label;
use crate::tree::Tree;
use hashbrown::HashMap;
use log::{info, warn};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;

/// CART decision tree classifier object.
///
/// Fitting grows a binary decision tree by Gini-driven recursive
/// partitioning; predicting walks an unlabeled attribute vector down to a
/// leaf and draws a label from the leaf's class-frequency distribution, each
/// label weighted by its training count. The draw is deliberately
/// probabilistic rather than majority-vote.
#[derive(Deserialize, Serialize, Clone, Default)]
pub struct CartClassifier {
    /// The fitted tree, `None` until [`CartClassifier::fit`] is called.
    pub tree: Option<Tree>,
    /// Attribute dimensionality seen at training time.
    pub n_attributes: usize,
}

impl CartClassifier {
    pub fn new() -> Self {
        CartClassifier {
            tree: None,
            n_attributes: 0,
        }
    }

    /// Fit the classifier on a training dataset.
    ///
    /// The dataset is non-empty and width-validated by construction, so
    /// fitting itself cannot fail; refitting replaces the previous tree.
    pub fn fit(&mut self, data: &Dataset) {
        let tree = Tree::fit(data);
        if tree.root.is_leaf() {
            warn!("Training data collapsed into a single leaf; no attribute separates the classes.");
        }
        info!(
            "Fitted a tree of depth {} with {} leaves on {} instances.",
            tree.depth,
            tree.n_leaves,
            data.len()
        );
        self.n_attributes = data.n_attributes();
        self.tree = Some(tree);
    }

    fn fitted_tree(&self) -> Result<&Tree, CartError> {
        self.tree.as_ref().ok_or(CartError::NotFitted)
    }

    /// Class-frequency distribution of the leaf reached by an unlabeled
    /// attribute vector of the trained dimensionality.
    pub fn predict_distribution(&self, attributes: &[AttributeValue]) -> Result<&HashMap<String, usize>, CartError> {
        let tree = self.fitted_tree()?;
        if attributes.len() != self.n_attributes {
            return Err(CartError::DimensionMismatch(self.n_attributes, attributes.len()));
        }
        Ok(tree.classify_distribution(attributes))
    }

    /// Predict a class label, drawing from the reached leaf's distribution
    /// with the supplied random source.
    pub fn predict_with_rng<R: Rng>(&self, attributes: &[AttributeValue], rng: &mut R) -> Result<String, CartError> {
        let counts = self.predict_distribution(attributes)?;
        Ok(sample_label(counts, rng))
    }

    /// Predict a class label using the thread-local random source.
    pub fn predict(&self, attributes: &[AttributeValue]) -> Result<String, CartError> {
        self.predict_with_rng(attributes, &mut rand::thread_rng())
    }

    /// Generate predictions for a batch of attribute vectors.
    ///
    /// * `batch` - The attribute vectors to classify.
    /// * `parallel` - Whether to classify the rows in parallel. The tree is
    ///   read-only after fitting, so rows have no data dependency on each
    ///   other.
    pub fn predict_batch(&self, batch: &[Vec<AttributeValue>], parallel: bool) -> Result<Vec<String>, CartError> {
        if parallel {
            batch.par_iter().map(|attributes| self.predict(attributes)).collect()
        } else {
            batch.iter().map(|attributes| self.predict(attributes)).collect()
        }
    }

    /// Fraction of test instances whose sampled prediction matches their
    /// actual label. Impure leaves make repeated evaluations vary.
    pub fn evaluate(&self, test: &Dataset) -> Result<f64, CartError> {
        let mut actual = Vec::with_capacity(test.len());
        let mut predicted = Vec::with_capacity(test.len());
        for instance in test.instances() {
            predicted.push(self.predict(&instance.attributes)?);
            actual.push(instance.label.clone());
        }
        Ok(accuracy(&actual, &predicted))
    }

    /// Write each test row with its predicted label appended, one delimited
    /// line per row: `attr1,...,attrN,actual,predicted`.
    pub fn write_predictions(&self, test: &Dataset, path: &str) -> Result<(), CartError> {
        let mut out = String::new();
        for instance in test.instances() {
            let predicted = self.predict(&instance.attributes)?;
            let mut fields: Vec<String> = instance.attributes.iter().map(|v| v.to_string()).collect();
            fields.push(instance.label.clone());
            fields.push(predicted);
            out.push_str(&fields.join(","));
            out.push('\n');
        }
        match fs::write(path, out) {
            Err(e) => Err(CartError::UnableToWrite(e.to_string())),
            Ok(_) => Ok(()),
        }
    }

    /// Save the classifier as a json object to a file.
    ///
    /// * `path` - Path to save the model.
    pub fn save_model(&self, path: &str) -> Result<(), CartError> {
        let model = self.json_dump()?;
        match fs::write(path, model) {
            Err(e) => Err(CartError::UnableToWrite(e.to_string())),
            Ok(_) => Ok(()),
        }
    }

    /// Dump the classifier as a json object.
    pub fn json_dump(&self) -> Result<String, CartError> {
        match serde_json::to_string(self) {
            Ok(s) => Ok(s),
            Err(e) => Err(CartError::UnableToWrite(e.to_string())),
        }
    }

    /// Load a classifier from a json string.
    ///
    /// * `json_str` - String object, which can be serialized to json.
    pub fn from_json(json_str: &str) -> Result<Self, CartError> {
        match serde_json::from_str::<CartClassifier>(json_str) {
            Ok(model) => Ok(model),
            Err(e) => Err(CartError::UnableToRead(e.to_string())),
        }
    }

    /// Load a classifier from a path to a json model object.
    ///
    /// * `path` - Path to load the model from.
    pub fn load_model(path: &str) -> Result<Self, CartError> {
        let json_str = match fs::read_to_string(path) {
            Ok(s) => Ok(s),
            Err(e) => Err(CartError::UnableToRead(e.to_string())),
        }?;
        Self::from_json(&json_str)
    }
}
