use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// The six species the deployed model distinguishes, in score-channel order.
pub const FROG_SPECIES: [&str; 6] = [
    "american bullfrog",
    "green treefrog",
    "northern leopard frog",
    "spring peeper",
    "wood frog",
    "american toad",
];

/// A fixed ordered list mapping class indices to human readable names.
///
/// The order must match the score channels of the model output: channel 4 + i
/// holds the score for name i. Built once at startup and shared by reference
/// afterwards, never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelTable {
    names: Vec<String>,
}

impl LabelTable {
    pub fn new(names: Vec<String>) -> Self {
        LabelTable { names }
    }

    /// The label table the frog-spotting deployment ships with.
    pub fn frog_species() -> Self {
        LabelTable::new(FROG_SPECIES.iter().map(|name| name.to_string()).collect())
    }

    /// Reads a file with the class names into a table so that the number ids
    /// which come directly from the inference session can be given meaning.
    pub fn from_classes_txt_file(filepath: &Path) -> io::Result<Self> {
        let names = BufReader::new(File::open(filepath)?)
            .lines()
            .collect::<io::Result<Vec<String>>>()?;
        Ok(LabelTable::new(names))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Resolves a class index to its name, falling back to the bare index for
    /// classes the table does not know about.
    pub fn resolve(&self, class_index: usize) -> String {
        match self.names.get(class_index) {
            Some(name) => name.clone(),
            None => class_index.to_string(),
        }
    }
}
