/*!
Downstream flow-rule construction and submission.

This module defines:
- `rule`: the forwarding-rule data model (`FlowRule`, `FlowMatch`,
  `FlowAction`) and its default parameters.
- `installer`: `FlowInstaller`, which turns a shortest-path query into one
  forwarding rule per hop and submits them through the `FlowSink` boundary.
*/

pub mod installer;
pub mod rule;

pub use installer::{FlowError, FlowInstaller, FlowSink};
pub use rule::{FlowAction, FlowMatch, FlowRule};
