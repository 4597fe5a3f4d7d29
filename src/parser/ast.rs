//! Syntax forest definitions and the arity-directed tree builder
//!
//! A program parses into a forest of [`SyntaxNode`]s. Value tokens become
//! leaves; each symbol token becomes a [`SyntaxNode::Call`] owning exactly
//! the sub-nodes its registered arity demands: `code` inline expressions,
//! `functions` deferred arguments, and (for block-taking commands) every
//! following sibling up to the next `)` or `;`.
//!
//! Nodes carry a pre-order `index` and a structural `location` path (the
//! child-slot ordinals from the root). Both exist purely for diagnostics
//! and the program listing; execution walks the tree by ownership.
//!
//! Function arguments and block bodies sit behind `Rc` so the interpreter
//! can hand them to deferred callables that outlive the current call frame.
//! Every `Rc` has a single owning parent at build time; the forest stays a
//! strict tree.

use std::rc::Rc;

use crate::interpreter::registry::{Arity, Registry};
use crate::parser::lexer::{Token, TokenKind};
use crate::parser::{ParseError, Span};
use crate::values::Value;

/// Diagnostic information shared by every node.
#[derive(Debug, Clone)]
pub struct NodeMeta {
    /// Position of this node in a pre-order traversal of the forest.
    pub index: usize,
    /// Child-slot path from the root; inline and function arguments occupy
    /// even slots, block children are numbered by position.
    pub location: Vec<usize>,
    pub span: Span,
    pub comment: String,
}

/// One node of the syntax forest.
#[derive(Debug, Clone)]
pub enum SyntaxNode {
    /// A literal value, pushed when evaluated.
    Literal { value: Value, meta: NodeMeta },

    /// A command application owning its argument subtrees.
    Call {
        symbol: char,
        arity: Arity,
        code_args: Vec<SyntaxNode>,
        fn_args: Vec<Rc<SyntaxNode>>,
        block: Option<Rc<[SyntaxNode]>>,
        meta: NodeMeta,
    },

    /// A `)` or `;` terminator kept in place so listings show it.
    End { meta: NodeMeta },
}

impl SyntaxNode {
    pub fn meta(&self) -> &NodeMeta {
        match self {
            SyntaxNode::Literal { meta, .. } => meta,
            SyntaxNode::Call { meta, .. } => meta,
            SyntaxNode::End { meta } => meta,
        }
    }

    pub fn span(&self) -> Span {
        self.meta().span
    }

    /// Command symbol, if this node is a call.
    pub fn symbol(&self) -> Option<char> {
        match self {
            SyntaxNode::Call { symbol, .. } => Some(*symbol),
            _ => None,
        }
    }
}

/// A parsed program: the top-level node sequence.
#[derive(Debug, Clone)]
pub struct Forest {
    pub nodes: Vec<SyntaxNode>,
}

impl Forest {
    /// Total node count across the whole forest.
    pub fn len(&self) -> usize {
        fn count(node: &SyntaxNode) -> usize {
            match node {
                SyntaxNode::Call {
                    code_args,
                    fn_args,
                    block,
                    ..
                } => {
                    1 + code_args.iter().map(count).sum::<usize>()
                        + fn_args.iter().map(|n| count(n)).sum::<usize>()
                        + block
                            .as_ref()
                            .map(|b| b.iter().map(count).sum())
                            .unwrap_or(0)
                }
                _ => 1,
            }
        }
        self.nodes.iter().map(count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Indented program listing with command aliases, for diagnostics.
    pub fn listing(&self, registry: &Registry) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            listing_node(node, registry, 0, &mut out);
        }
        out
    }
}

fn listing_node(node: &SyntaxNode, registry: &Registry, indent: usize, out: &mut String) {
    let pad = " ".repeat(indent);
    match node {
        SyntaxNode::Literal { value, meta } => {
            out.push_str(&format!("{}{}", pad, value));
            if !meta.comment.is_empty() {
                out.push_str(&format!("    ⍝ {}", meta.comment));
            }
            out.push('\n');
        }
        SyntaxNode::End { .. } => {
            out.push_str(&format!("{})\n", pad));
        }
        SyntaxNode::Call {
            symbol,
            code_args,
            fn_args,
            block,
            meta,
            ..
        } => {
            let alias = registry
                .get(*symbol)
                .map(|c| c.alias)
                .unwrap_or("?");
            out.push_str(&format!("{}{} '{}'", pad, symbol, alias));
            if !meta.comment.is_empty() {
                out.push_str(&format!("    ⍝ {}", meta.comment));
            }
            out.push('\n');
            for arg in code_args {
                listing_node(arg, registry, indent + 2, out);
            }
            for arg in fn_args {
                listing_node(arg, registry, indent + 2, out);
            }
            if let Some(body) = block {
                for child in body.iter() {
                    listing_node(child, registry, indent + 2, out);
                }
            }
        }
    }
}

/// Build the syntax forest for a token stream.
///
/// Consumption is arity directed: the registry decides how many of the
/// following nodes belong to each symbol. Exhausting the stream while a
/// command is still owed inline or function children is fatal; a stray
/// block terminator merely ends the current context.
pub fn build(tokens: &[Token], registry: &Registry) -> Result<Forest, ParseError> {
    let mut builder = Builder {
        tokens,
        pos: 0,
        next_index: 0,
        registry,
    };

    let mut nodes = Vec::new();
    while !builder.exhausted() {
        let slot = nodes.len();
        let (node, _ended) = builder.node(&[slot])?;
        nodes.push(node);
    }

    Ok(Forest { nodes })
}

struct Builder<'a> {
    tokens: &'a [Token],
    pos: usize,
    next_index: usize,
    registry: &'a Registry,
}

impl<'a> Builder<'a> {
    fn exhausted(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn take_index(&mut self) -> usize {
        let index = self.next_index;
        self.next_index += 1;
        index
    }

    /// Parse one node. The flag reports whether it was a block terminator,
    /// which ends the enclosing context.
    fn node(&mut self, location: &[usize]) -> Result<(SyntaxNode, bool), ParseError> {
        let token = &self.tokens[self.pos];
        self.pos += 1;

        let meta = NodeMeta {
            index: self.take_index(),
            location: location.to_vec(),
            span: token.span,
            comment: token.comment.clone(),
        };

        match &token.kind {
            TokenKind::BlockEnd => Ok((SyntaxNode::End { meta }, true)),

            TokenKind::Value(value) => Ok((
                SyntaxNode::Literal {
                    value: value.clone(),
                    meta,
                },
                false,
            )),

            TokenKind::Symbol(symbol) => {
                let node = self.call(*symbol, meta)?;
                Ok((node, false))
            }
        }
    }

    /// Parse a command node, consuming the children its arity demands.
    fn call(&mut self, symbol: char, meta: NodeMeta) -> Result<SyntaxNode, ParseError> {
        let arity = match self.registry.get(symbol) {
            Some(command) => command.arity,
            None => {
                return Err(ParseError::UnknownSymbol {
                    symbol,
                    span: meta.span,
                });
            }
        };

        let mut code_args = Vec::with_capacity(arity.code);
        for slot in 0..arity.code {
            code_args.push(self.owed_child(symbol, &meta, slot)?);
        }

        let mut fn_args = Vec::with_capacity(arity.functions);
        for slot in 0..arity.functions {
            fn_args.push(Rc::new(self.owed_child(symbol, &meta, arity.code + slot)?));
        }

        let block = if arity.block {
            let mut body = Vec::new();
            while !self.exhausted() {
                let mut location = meta.location.clone();
                location.push(body.len());
                let (child, ended) = self.node(&location)?;
                body.push(child);
                if ended {
                    break;
                }
            }
            Some(Rc::from(body))
        } else {
            None
        };

        Ok(SyntaxNode::Call {
            symbol,
            arity,
            code_args,
            fn_args,
            block,
            meta,
        })
    }

    /// Parse a child the command is owed. Stream exhaustion or a block
    /// terminator in this position is an arity under-consumption error.
    fn owed_child(
        &mut self,
        symbol: char,
        meta: &NodeMeta,
        slot: usize,
    ) -> Result<SyntaxNode, ParseError> {
        if self.exhausted() {
            return Err(ParseError::UnexpectedEndOfProgram {
                symbol,
                span: meta.span,
            });
        }
        let mut location = meta.location.clone();
        location.push(slot * 2);
        let (child, ended) = self.node(&location)?;
        if ended {
            return Err(ParseError::UnexpectedEndOfProgram {
                symbol,
                span: meta.span,
            });
        }
        Ok(child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    fn parse(source: &str) -> Result<Forest, ParseError> {
        let registry = Registry::new();
        build(&tokenize(source), &registry)
    }

    #[test]
    fn test_literals_and_calls() {
        let forest = parse("3,4+").expect("parse failed");
        assert_eq!(forest.nodes.len(), 3);
        assert!(matches!(forest.nodes[0], SyntaxNode::Literal { .. }));
        assert_eq!(forest.nodes[2].symbol(), Some('+'));
    }

    #[test]
    fn test_inline_children_are_owned_by_the_command() {
        // ‰ takes one stack and one inline argument: the 3 belongs to it.
        let forest = parse("5‰3").expect("parse failed");
        assert_eq!(forest.nodes.len(), 2);
        match &forest.nodes[1] {
            SyntaxNode::Call {
                symbol, code_args, ..
            } => {
                assert_eq!(*symbol, '‰');
                assert_eq!(code_args.len(), 1);
            }
            other => panic!("expected call node, got {:?}", other),
        }
    }

    #[test]
    fn test_block_consumes_to_terminator() {
        let forest = parse("3:_+;4").expect("parse failed");
        match &forest.nodes[1] {
            SyntaxNode::Call { symbol, block, .. } => {
                assert_eq!(*symbol, ':');
                let body = block.as_ref().expect("missing block");
                // _, +, and the terminator itself
                assert_eq!(body.len(), 3);
                assert!(matches!(body[2], SyntaxNode::End { .. }));
            }
            other => panic!("expected call node, got {:?}", other),
        }
        // the 4 after the terminator is back at top level
        assert!(matches!(forest.nodes[2], SyntaxNode::Literal { .. }));
    }

    #[test]
    fn test_unknown_symbol_is_fatal() {
        let result = parse("3,4☹");
        assert!(matches!(result, Err(ParseError::UnknownSymbol { .. })));
    }

    #[test]
    fn test_truncated_program_is_fatal() {
        // ‰ is owed an inline child that never arrives.
        let result = parse("5‰");
        assert!(matches!(
            result,
            Err(ParseError::UnexpectedEndOfProgram { symbol: '‰', .. })
        ));
    }

    #[test]
    fn test_block_end_in_owed_slot_is_fatal() {
        let result = parse("5‰)");
        assert!(matches!(
            result,
            Err(ParseError::UnexpectedEndOfProgram { .. })
        ));
    }

    #[test]
    fn test_preorder_indices() {
        let forest = parse("5‰3?1,0").expect("parse failed");
        // 5(0) ‰(1)[3(2)] ?(3)[1(4) 0(5)]
        assert_eq!(forest.nodes[0].meta().index, 0);
        assert_eq!(forest.nodes[1].meta().index, 1);
        match &forest.nodes[2] {
            SyntaxNode::Call { fn_args, meta, .. } => {
                assert_eq!(meta.index, 3);
                assert_eq!(fn_args[0].meta().index, 4);
                assert_eq!(fn_args[1].meta().index, 5);
            }
            other => panic!("expected call node, got {:?}", other),
        }
    }
}
