use crate::classifiers::decision_tree::instance_conditional_test::InstanceConditionalTest;
use crate::classifiers::decision_tree::nodes::node::{Node, normalized};
use crate::core::instances::Instance;

pub struct SplitNode {
    observed_class_distribution: Vec<f64>,
    split_test: Box<dyn InstanceConditionalTest>,
    children: Vec<Box<dyn Node>>,
    weighted_impurity_decrease: f64,
}

impl SplitNode {
    pub fn new(
        split_test: Box<dyn InstanceConditionalTest>,
        observed_class_distribution: Vec<f64>,
        children: Vec<Box<dyn Node>>,
        weighted_impurity_decrease: f64,
    ) -> Self {
        debug_assert_eq!(children.len(), split_test.max_branches());
        Self {
            observed_class_distribution,
            split_test,
            children,
            weighted_impurity_decrease,
        }
    }

    pub fn get_child(&self, index: usize) -> Option<&dyn Node> {
        self.children.get(index).map(|c| c.as_ref())
    }

    pub fn split_test(&self) -> &dyn InstanceConditionalTest {
        self.split_test.as_ref()
    }

    fn instance_child_index(&self, instance: &dyn Instance) -> Option<usize> {
        self.split_test.branch_for_instance(instance)
    }
}

impl Node for SplitNode {
    fn get_observed_class_distribution(&self) -> &[f64] {
        &self.observed_class_distribution
    }

    fn is_leaf(&self) -> bool {
        false
    }

    fn filter_instance_to_leaf<'a>(&'a self, instance: &dyn Instance) -> &'a dyn Node {
        match self
            .instance_child_index(instance)
            .and_then(|i| self.get_child(i))
        {
            Some(child) => child.filter_instance_to_leaf(instance),
            None => self,
        }
    }

    fn get_class_votes(&self, instance: &dyn Instance) -> Vec<f64> {
        let leaf = self.filter_instance_to_leaf(instance);
        if leaf.is_leaf() {
            leaf.get_class_votes(instance)
        } else {
            normalized(leaf.get_observed_class_distribution())
        }
    }

    fn number_of_leaves(&self) -> usize {
        self.children.iter().map(|c| c.number_of_leaves()).sum()
    }

    fn accumulate_importances(&self, importances: &mut [f64]) {
        for attribute in self.split_test.get_atts_test_depends_on() {
            if let Some(slot) = importances.get_mut(attribute) {
                *slot += self.weighted_impurity_decrease;
            }
        }
        for child in &self.children {
            child.accumulate_importances(importances);
        }
    }
}
