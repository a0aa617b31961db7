use crate::{error::ErrorTree, node::VisitableNode};

///
/// Event
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Event {
    Enter,
    Exit,
}

///
/// Visitor
///

pub trait Visitor {
    fn visit<N: VisitableNode + ?Sized>(&mut self, node: &N, event: Event);

    fn enter<N: VisitableNode + ?Sized>(&mut self, node: &N) {
        self.visit(node, Event::Enter);
    }

    fn exit<N: VisitableNode + ?Sized>(&mut self, node: &N) {
        self.visit(node, Event::Exit);
    }
}

///
/// ValidateVisitor
///
/// Runs every node's local validation, filing errors under the route of
/// the node that raised them.
///

#[derive(Debug, Default)]
pub struct ValidateVisitor {
    pub errors: ErrorTree,
    route: Vec<String>,
}

impl ValidateVisitor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn current_route(&self) -> String {
        self.route
            .iter()
            .filter(|s| !s.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl Visitor for ValidateVisitor {
    fn visit<N: VisitableNode + ?Sized>(&mut self, node: &N, event: Event) {
        match event {
            Event::Enter => {
                self.route.push(node.route_key());

                if let Err(errs) = node.validate() {
                    let route = self.current_route();
                    self.errors.merge_at(&route, errs);
                }
            }
            Event::Exit => {
                self.route.pop();
            }
        }
    }
}
