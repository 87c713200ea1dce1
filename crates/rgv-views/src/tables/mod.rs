//! Footer tables: compiler output, node execution order, generated resources

use egui::{RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use rgv_data::{NodeExecution, ResourceTemplate};

use crate::colors::{type_color, TEXT_MUTED};
use crate::{SpaceView, ViewAction, ViewerContext};

const ROW_HEIGHT: f32 = 22.0;

/// Compiler messages, one line each
pub struct MessageLogView {
    title: String,
}

impl MessageLogView {
    pub fn new() -> Self {
        Self {
            title: "Output Log".to_string(),
        }
    }
}

impl Default for MessageLogView {
    fn default() -> Self {
        Self::new()
    }
}

impl SpaceView for MessageLogView {
    fn title(&self) -> &str {
        &self.title
    }

    fn ui(&mut self, ctx: &ViewerContext<'_>, ui: &mut Ui) -> Option<ViewAction> {
        let messages = &ctx.artifact.artifact().messages;
        if messages.is_empty() {
            ui.label(RichText::new("No messages").color(TEXT_MUTED));
            return None;
        }

        ScrollArea::vertical()
            .id_source("output_log")
            .auto_shrink([false, false])
            .show_rows(ui, ROW_HEIGHT, messages.len(), |ui, rows| {
                for message in &messages[rows] {
                    ui.label(RichText::new(message).small());
                }
            });
        None
    }
}

/// Nodes in execution order with their dependency counts
pub struct NodeTableView {
    title: String,
}

impl NodeTableView {
    pub fn new() -> Self {
        Self {
            title: "Nodes".to_string(),
        }
    }
}

impl Default for NodeTableView {
    fn default() -> Self {
        Self::new()
    }
}

/// `(produced: p, consumed: c)`
pub fn dependency_summary(node: &NodeExecution) -> String {
    format!("(produced: {}, consumed: {})", node.produced_count(), node.consumed_count())
}

impl SpaceView for NodeTableView {
    fn title(&self) -> &str {
        &self.title
    }

    fn ui(&mut self, ctx: &ViewerContext<'_>, ui: &mut Ui) -> Option<ViewAction> {
        let nodes = &ctx.artifact.artifact().node_execution_order;

        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::exact(32.0))
            .column(Column::remainder().at_least(120.0).clip(true))
            .min_scrolled_height(0.0)
            .body(|body| {
                body.rows(ROW_HEIGHT, nodes.len(), |row_index, mut row| {
                    let node = &nodes[row_index];
                    row.col(|ui| {
                        ui.label(RichText::new(row_index.to_string()).small().monospace());
                    });
                    row.col(|ui| {
                        ui.label(&node.display_name);
                        ui.label(RichText::new(dependency_summary(node)).color(TEXT_MUTED));
                    });
                });
            });
        None
    }
}

/// Every resource template with its type and number of uses
pub struct ResourceTableView {
    title: String,
}

impl ResourceTableView {
    pub fn new() -> Self {
        Self {
            title: "Generated Resources".to_string(),
        }
    }
}

impl Default for ResourceTableView {
    fn default() -> Self {
        Self::new()
    }
}

/// `Resource #i [ID=id]`
pub fn resource_caption(index: usize, template: &ResourceTemplate) -> String {
    format!("Resource #{} [ID={}]", index, template.id)
}

impl SpaceView for ResourceTableView {
    fn title(&self) -> &str {
        &self.title
    }

    fn ui(&mut self, ctx: &ViewerContext<'_>, ui: &mut Ui) -> Option<ViewAction> {
        let templates = &ctx.artifact.artifact().resource_templates;

        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::exact(100.0))
            .column(Column::remainder().at_least(160.0).clip(true))
            .min_scrolled_height(0.0)
            .body(|body| {
                body.rows(ROW_HEIGHT, templates.len(), |row_index, mut row| {
                    let template = &templates[row_index];
                    row.col(|ui| {
                        ui.label(
                            RichText::new(template.resource_type.as_str())
                                .small()
                                .color(type_color(template.resource_type)),
                        );
                    });
                    row.col(|ui| {
                        ui.label(resource_caption(row_index, template));
                        ui.label(
                            RichText::new(format!("(# of different uses: {})", template.usage_ranges.len()))
                                .color(TEXT_MUTED),
                        );
                    });
                });
            });
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgv_core::{DependencyType, ResourceType};

    #[test]
    fn test_dependency_summary() {
        let node = NodeExecution {
            display_name: "Shadow".to_string(),
            dependencies: [1, 2, 3, 2].into_iter().map(DependencyType::from_code).collect(),
        };
        assert_eq!(dependency_summary(&node), "(produced: 2, consumed: 2)");
    }

    #[test]
    fn test_resource_caption() {
        let template = ResourceTemplate {
            id: "17".to_string(),
            resource_type: ResourceType::Image,
            usage_ranges: Vec::new(),
            usage_points: Vec::new(),
            is_optimizable: false,
        };
        assert_eq!(resource_caption(3, &template), "Resource #3 [ID=17]");
    }
}
