//! HID report types, static descriptors and the report sink seam.

pub mod descriptor;
pub mod keyboard;


use crate::error::Error;
use keyboard::InputReport;

/// Destination for input reports.
///
/// On the target this notifies the Report characteristic of the current
/// connection; tests record what would have been sent.
pub trait ReportSink {
    fn send(&mut self, report: &InputReport) -> Result<(), Error>;
}

impl<T: ReportSink + ?Sized> ReportSink for &mut T {
    fn send(&mut self, report: &InputReport) -> Result<(), Error> {
        (**self).send(report)
    }
}
