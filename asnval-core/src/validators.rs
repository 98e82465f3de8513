//! Checker implementations, one submodule per concern.
//!
//! Every checker is a pure function of the parsed document and the run
//! context: no clock reads, no shared state, no visibility into other
//! checkers' findings.
pub mod certificate;
pub mod product;
pub mod structure;
pub mod tax_id;
pub mod timing;

pub use certificate::CertificateValidator;
pub use product::ProductValidator;
pub use structure::StructureValidator;
pub use tax_id::TaxIdValidator;
pub use timing::TimingValidator;

use crate::catalog::ProductCatalog;
use crate::config::ValidationConfig;
use crate::document::ParsedDocument;
use crate::report::{Finding, ValidatorName};
use chrono::NaiveDate;

/// Read-only inputs shared by every checker in one run.
///
/// "Today" is injected rather than read from the system clock so runs
/// are reproducible.
#[derive(Debug, Clone, Copy)]
pub struct RunContext<'a> {
    config: &'a ValidationConfig,
    catalog: &'a ProductCatalog,
    today: NaiveDate,
}

impl<'a> RunContext<'a> {
    pub fn new(
        config: &'a ValidationConfig,
        catalog: &'a ProductCatalog,
        today: NaiveDate,
    ) -> Self {
        RunContext {
            config,
            catalog,
            today,
        }
    }

    pub fn config(&self) -> &'a ValidationConfig {
        self.config
    }

    pub fn catalog(&self) -> &'a ProductCatalog {
        self.catalog
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }
}

/// Common seam implemented by each checker.
pub trait Validator {
    fn name(&self) -> ValidatorName;

    /// Inspect the document and return findings. Never fails: local edge
    /// cases become findings for this concern only.
    fn run(&self, document: &ParsedDocument, ctx: &RunContext<'_>) -> Vec<Finding>;
}

static STRUCTURE: StructureValidator = StructureValidator;
static TAX_ID: TaxIdValidator = TaxIdValidator;
static PRODUCT: ProductValidator = ProductValidator;
static TIMING: TimingValidator = TimingValidator;
static CERTIFICATE: CertificateValidator = CertificateValidator;

/// The fixed, ordered checker registry. Registration order is the
/// reporting order of the final report.
pub fn registry() -> [&'static dyn Validator; 5] {
    [&STRUCTURE, &TAX_ID, &PRODUCT, &TIMING, &CERTIFICATE]
}
