use crate::classifiers::decision_tree::InstanceConditionalTest;
use std::cmp::Ordering;

/// A candidate split ranked by the impurity decrease it achieves.
#[derive(Debug)]
pub struct AttributeSplitSuggestion {
    split_test: Option<Box<dyn InstanceConditionalTest>>,
    merit: f64,
}

impl AttributeSplitSuggestion {
    pub fn new(split_test: Option<Box<dyn InstanceConditionalTest>>, merit: f64) -> Self {
        Self { split_test, merit }
    }

    pub fn get_split_test(&self) -> Option<&dyn InstanceConditionalTest> {
        self.split_test.as_deref()
    }

    pub fn take_split_test(&mut self) -> Option<Box<dyn InstanceConditionalTest>> {
        self.split_test.take()
    }

    pub fn get_merit(&self) -> f64 {
        self.merit
    }
}

impl PartialEq for AttributeSplitSuggestion {
    fn eq(&self, other: &Self) -> bool {
        self.merit == other.merit
    }
}

impl Eq for AttributeSplitSuggestion {}

impl PartialOrd for AttributeSplitSuggestion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AttributeSplitSuggestion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.merit.total_cmp(&other.merit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::decision_tree::NumericAttributeBinaryTest;

    fn suggestion(merit: f64) -> AttributeSplitSuggestion {
        AttributeSplitSuggestion::new(
            Some(Box::new(NumericAttributeBinaryTest::new(0, 1.0, true))),
            merit,
        )
    }

    #[test]
    fn orders_by_merit() {
        let mut v = vec![suggestion(0.1), suggestion(0.5), suggestion(0.3)];
        v.sort();
        let merits: Vec<f64> = v.iter().map(|s| s.get_merit()).collect();
        assert_eq!(merits, vec![0.1, 0.3, 0.5]);
        assert!(suggestion(0.2) > suggestion(0.1));
    }

    #[test]
    fn split_test_can_be_taken_once() {
        let mut s = suggestion(0.5);
        assert!(s.get_split_test().is_some());
        assert!(s.take_split_test().is_some());
        assert!(s.get_split_test().is_none());
    }
}
