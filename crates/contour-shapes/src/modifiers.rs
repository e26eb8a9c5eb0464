//! Modifier lists and declared accessibility.

use std::fmt;

use bitflags::bitflags;
use contour_syntax::{EditedSyntax, SyntaxKind, SyntaxNode, TextEdit};
use tracing::debug;

use crate::error::ShapeError;
use crate::support::SHAPES_TARGET;

const SHAPE: &str = "ModifierListInfo";

/// Declared accessibility of a member or type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Accessibility {
    /// No accessibility applies, or none is written.
    #[default]
    NotApplicable,
    /// `private`
    Private,
    /// `private protected`
    ProtectedAndInternal,
    /// `protected`
    Protected,
    /// `internal`
    Internal,
    /// `protected internal`
    ProtectedOrInternal,
    /// `public`
    Public,
}

impl Accessibility {
    /// The keywords that spell this accessibility, in canonical order.
    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::NotApplicable => &[],
            Self::Private => &["private"],
            Self::ProtectedAndInternal => &["private", "protected"],
            Self::Protected => &["protected"],
            Self::Internal => &["internal"],
            Self::ProtectedOrInternal => &["protected", "internal"],
            Self::Public => &["public"],
        }
    }

    /// Whether a single keyword spells this accessibility.
    #[must_use]
    pub const fn is_single_token(self) -> bool {
        self.keywords().len() == 1
    }

    fn from_kinds(kinds: ModifierKinds) -> Self {
        let protected = kinds.contains(ModifierKinds::PROTECTED);
        if kinds.contains(ModifierKinds::PUBLIC) {
            Self::Public
        } else if kinds.contains(ModifierKinds::PRIVATE) {
            if protected {
                Self::ProtectedAndInternal
            } else {
                Self::Private
            }
        } else if kinds.contains(ModifierKinds::INTERNAL) {
            if protected {
                Self::ProtectedOrInternal
            } else {
                Self::Internal
            }
        } else if protected {
            Self::Protected
        } else {
            Self::NotApplicable
        }
    }
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotApplicable => f.write_str("not applicable"),
            other => f.write_str(&other.keywords().join(" ")),
        }
    }
}

bitflags! {
    /// The set of modifier keywords present on a declaration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ModifierKinds: u32 {
        /// `new`
        const NEW = 1;
        /// `public`
        const PUBLIC = 1 << 1;
        /// `private`
        const PRIVATE = 1 << 2;
        /// `protected`
        const PROTECTED = 1 << 3;
        /// `internal`
        const INTERNAL = 1 << 4;
        /// `file`
        const FILE = 1 << 5;
        /// `const`
        const CONST = 1 << 6;
        /// `static`
        const STATIC = 1 << 7;
        /// `virtual`
        const VIRTUAL = 1 << 8;
        /// `sealed`
        const SEALED = 1 << 9;
        /// `override`
        const OVERRIDE = 1 << 10;
        /// `abstract`
        const ABSTRACT = 1 << 11;
        /// `readonly`
        const READ_ONLY = 1 << 12;
        /// `extern`
        const EXTERN = 1 << 13;
        /// `unsafe`
        const UNSAFE = 1 << 14;
        /// `volatile`
        const VOLATILE = 1 << 15;
        /// `async`
        const ASYNC = 1 << 16;
        /// `partial`
        const PARTIAL = 1 << 17;
        /// `required`
        const REQUIRED = 1 << 18;
        /// `ref`
        const REF = 1 << 19;
        /// `out`
        const OUT = 1 << 20;
        /// `in`
        const IN = 1 << 21;
        /// `params`
        const PARAMS = 1 << 22;
        /// `this`, on an extension method's first parameter.
        const THIS = 1 << 23;
        /// `scoped`
        const SCOPED = 1 << 24;

        /// Every accessibility keyword.
        const ACCESSIBILITY = Self::PUBLIC.bits()
            | Self::PRIVATE.bits()
            | Self::PROTECTED.bits()
            | Self::INTERNAL.bits();
    }
}

impl Default for ModifierKinds {
    fn default() -> Self {
        Self::empty()
    }
}

impl ModifierKinds {
    /// Maps a modifier keyword onto its flag.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "new" => Self::NEW,
            "public" => Self::PUBLIC,
            "private" => Self::PRIVATE,
            "protected" => Self::PROTECTED,
            "internal" => Self::INTERNAL,
            "file" => Self::FILE,
            "const" => Self::CONST,
            "static" => Self::STATIC,
            "virtual" => Self::VIRTUAL,
            "sealed" => Self::SEALED,
            "override" => Self::OVERRIDE,
            "abstract" => Self::ABSTRACT,
            "readonly" => Self::READ_ONLY,
            "extern" => Self::EXTERN,
            "unsafe" => Self::UNSAFE,
            "volatile" => Self::VOLATILE,
            "async" => Self::ASYNC,
            "partial" => Self::PARTIAL,
            "required" => Self::REQUIRED,
            "ref" => Self::REF,
            "out" => Self::OUT,
            "in" => Self::IN,
            "params" => Self::PARAMS,
            "this" => Self::THIS,
            "scoped" => Self::SCOPED,
            _ => Self::empty(),
        }
    }
}

/// Whether `kind` carries a modifier list.
const fn has_modifiers(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::ClassDeclaration
            | SyntaxKind::StructDeclaration
            | SyntaxKind::InterfaceDeclaration
            | SyntaxKind::RecordDeclaration
            | SyntaxKind::EnumDeclaration
            | SyntaxKind::DelegateDeclaration
            | SyntaxKind::MethodDeclaration
            | SyntaxKind::ConstructorDeclaration
            | SyntaxKind::DestructorDeclaration
            | SyntaxKind::OperatorDeclaration
            | SyntaxKind::ConversionOperatorDeclaration
            | SyntaxKind::PropertyDeclaration
            | SyntaxKind::IndexerDeclaration
            | SyntaxKind::EventDeclaration
            | SyntaxKind::EventFieldDeclaration
            | SyntaxKind::FieldDeclaration
            | SyntaxKind::AccessorDeclaration
            | SyntaxKind::LocalDeclarationStatement
            | SyntaxKind::LocalFunctionStatement
            | SyntaxKind::Parameter
    )
}

/// Modifier tokens of `node`. Parameters spell theirs as bare keywords
/// rather than `modifier` nodes in some grammar revisions.
fn modifier_tokens(node: SyntaxNode<'_>) -> Vec<SyntaxNode<'_>> {
    if !node.is(SyntaxKind::Parameter) {
        return node.children_of_kind(SyntaxKind::Modifier);
    }
    node.tokens()
        .into_iter()
        .filter(|token| {
            token.is(SyntaxKind::Modifier)
                || (!token.is_named() && !ModifierKinds::from_keyword(token.text()).is_empty())
        })
        .collect()
}

/// The container a member declaration sits in, skipping its declaration
/// list.
fn container(declaration: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    let parent = declaration.parent()?;
    if parent.is(SyntaxKind::DeclarationList) {
        parent.parent()
    } else {
        Some(parent)
    }
}

/// The accessibility `declaration` has when none is written.
///
/// Returns [`Accessibility::NotApplicable`] for kinds that never carry an
/// accessibility, such as parameters, locals and accessors.
#[must_use]
pub fn default_accessibility(declaration: SyntaxNode<'_>) -> Accessibility {
    let nested_in_type = container(declaration).is_some_and(|owner| {
        matches!(
            owner.kind(),
            SyntaxKind::ClassDeclaration
                | SyntaxKind::StructDeclaration
                | SyntaxKind::RecordDeclaration
                | SyntaxKind::InterfaceDeclaration
        )
    });
    let in_interface =
        container(declaration).is_some_and(|owner| owner.is(SyntaxKind::InterfaceDeclaration));
    match declaration.kind() {
        SyntaxKind::ClassDeclaration
        | SyntaxKind::StructDeclaration
        | SyntaxKind::InterfaceDeclaration
        | SyntaxKind::RecordDeclaration
        | SyntaxKind::EnumDeclaration
        | SyntaxKind::DelegateDeclaration => {
            if in_interface {
                Accessibility::Public
            } else if nested_in_type {
                Accessibility::Private
            } else {
                Accessibility::Internal
            }
        }
        SyntaxKind::ConstructorDeclaration => {
            let info = ModifierListInfo::create(declaration);
            if info.is_static() {
                Accessibility::Public
            } else {
                Accessibility::Private
            }
        }
        SyntaxKind::MethodDeclaration
        | SyntaxKind::PropertyDeclaration
        | SyntaxKind::IndexerDeclaration
        | SyntaxKind::EventDeclaration
        | SyntaxKind::EventFieldDeclaration
        | SyntaxKind::FieldDeclaration => {
            if in_interface {
                Accessibility::Public
            } else {
                Accessibility::Private
            }
        }
        SyntaxKind::OperatorDeclaration
        | SyntaxKind::ConversionOperatorDeclaration
        | SyntaxKind::DestructorDeclaration
        | SyntaxKind::EnumMemberDeclaration
        | SyntaxKind::NamespaceDeclaration => Accessibility::Public,
        _ => Accessibility::NotApplicable,
    }
}

/// Deletes `token` and the whitespace that follows it.
fn delete_token(token: SyntaxNode<'_>) -> TextEdit {
    let range = token.byte_range();
    let trailing = token
        .source()
        .get(range.end..)
        .map_or(0, |rest| rest.len() - rest.trim_start_matches([' ', '\t']).len());
    TextEdit::delete(range.start..range.end + trailing)
}

/// The modifiers of a declaration, parameter or local declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierListInfo<'t> {
    parent: Option<SyntaxNode<'t>>,
    modifiers: Vec<SyntaxNode<'t>>,
}

impl<'t> ModifierListInfo<'t> {
    /// Collects the modifiers of `node` when it is a kind that has them.
    #[must_use]
    pub fn create(node: SyntaxNode<'t>) -> Self {
        if !has_modifiers(node.kind()) {
            return Self::default();
        }
        Self {
            parent: Some(node),
            modifiers: modifier_tokens(node),
        }
    }

    /// The declaration that owns the modifiers.
    #[must_use]
    pub const fn parent(&self) -> Option<SyntaxNode<'t>> {
        self.parent
    }

    /// The modifier tokens, in source order.
    #[must_use]
    pub fn modifiers(&self) -> &[SyntaxNode<'t>] {
        &self.modifiers
    }

    /// The set of modifier keywords present.
    #[must_use]
    pub fn kinds(&self) -> ModifierKinds {
        self.modifiers
            .iter()
            .map(|modifier| ModifierKinds::from_keyword(modifier.text()))
            .fold(ModifierKinds::empty(), |acc, kind| acc | kind)
    }

    /// The accessibility spelled by the modifiers, or
    /// [`Accessibility::NotApplicable`] when none is written.
    #[must_use]
    pub fn explicit_accessibility(&self) -> Accessibility {
        Accessibility::from_kinds(self.kinds())
    }

    /// The written accessibility, falling back to the declaration's
    /// default.
    #[must_use]
    pub fn effective_accessibility(&self) -> Accessibility {
        match (self.explicit_accessibility(), self.parent) {
            (Accessibility::NotApplicable, Some(parent)) => default_accessibility(parent),
            (explicit, _) => explicit,
        }
    }

    /// `new`
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.kinds().contains(ModifierKinds::NEW)
    }

    /// `const`
    #[must_use]
    pub fn is_const(&self) -> bool {
        self.kinds().contains(ModifierKinds::CONST)
    }

    /// `static`
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.kinds().contains(ModifierKinds::STATIC)
    }

    /// `virtual`
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        self.kinds().contains(ModifierKinds::VIRTUAL)
    }

    /// `sealed`
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.kinds().contains(ModifierKinds::SEALED)
    }

    /// `override`
    #[must_use]
    pub fn is_override(&self) -> bool {
        self.kinds().contains(ModifierKinds::OVERRIDE)
    }

    /// `abstract`
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.kinds().contains(ModifierKinds::ABSTRACT)
    }

    /// `readonly`
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.kinds().contains(ModifierKinds::READ_ONLY)
    }

    /// `extern`
    #[must_use]
    pub fn is_extern(&self) -> bool {
        self.kinds().contains(ModifierKinds::EXTERN)
    }

    /// `unsafe`
    #[must_use]
    pub fn is_unsafe(&self) -> bool {
        self.kinds().contains(ModifierKinds::UNSAFE)
    }

    /// `volatile`
    #[must_use]
    pub fn is_volatile(&self) -> bool {
        self.kinds().contains(ModifierKinds::VOLATILE)
    }

    /// `async`
    #[must_use]
    pub fn is_async(&self) -> bool {
        self.kinds().contains(ModifierKinds::ASYNC)
    }

    /// `partial`
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.kinds().contains(ModifierKinds::PARTIAL)
    }

    /// `ref`
    #[must_use]
    pub fn is_ref(&self) -> bool {
        self.kinds().contains(ModifierKinds::REF)
    }

    /// `out`
    #[must_use]
    pub fn is_out(&self) -> bool {
        self.kinds().contains(ModifierKinds::OUT)
    }

    /// `in`
    #[must_use]
    pub fn is_in(&self) -> bool {
        self.kinds().contains(ModifierKinds::IN)
    }

    /// `params`
    #[must_use]
    pub fn is_params(&self) -> bool {
        self.kinds().contains(ModifierKinds::PARAMS)
    }

    /// Whether the match succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.parent.is_some()
    }

    /// Rewrites the declaration so its written accessibility is
    /// `accessibility`. Passing [`Accessibility::NotApplicable`] removes
    /// the accessibility keywords.
    ///
    /// The new keywords go after `new` and before every other modifier.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::NotInitialized`] on a failed match, or a
    /// syntax error if the edited source cannot be re-parsed.
    pub fn with_explicit_accessibility(
        &self,
        accessibility: Accessibility,
    ) -> Result<EditedSyntax, ShapeError> {
        let parent = self.parent.ok_or_else(|| ShapeError::not_initialized(SHAPE))?;
        let current = self.explicit_accessibility();
        let (written, rest): (Vec<&SyntaxNode<'t>>, Vec<&SyntaxNode<'t>>) =
            self.modifiers.iter().partition(|modifier| {
                ModifierKinds::from_keyword(modifier.text())
                    .intersects(ModifierKinds::ACCESSIBILITY)
            });

        let edits = if current == accessibility {
            Vec::new()
        } else if let ([only], true) = (written.as_slice(), accessibility.is_single_token()) {
            vec![TextEdit::replace(
                only.byte_range(),
                accessibility.keywords().join(" "),
            )]
        } else {
            let mut edits: Vec<_> = written.iter().map(|token| delete_token(**token)).collect();
            if accessibility != Accessibility::NotApplicable {
                edits.push(Self::insertion(parent, &rest, accessibility));
            }
            edits
        };

        debug!(
            target: SHAPES_TARGET,
            kind = %parent.kind(),
            from = %current,
            to = %accessibility,
            "rewriting accessibility"
        );
        Ok(EditedSyntax::apply(parent, &edits)?)
    }

    /// Removes every accessibility keyword.
    ///
    /// # Errors
    ///
    /// As for [`Self::with_explicit_accessibility`].
    pub fn without_explicit_accessibility(&self) -> Result<EditedSyntax, ShapeError> {
        self.with_explicit_accessibility(Accessibility::NotApplicable)
    }

    fn insertion(
        parent: SyntaxNode<'t>,
        rest: &[&SyntaxNode<'t>],
        accessibility: Accessibility,
    ) -> TextEdit {
        let keywords = accessibility.keywords().join(" ");
        if let Some(next) = rest.iter().find(|modifier| modifier.text() != "new") {
            return TextEdit::insert(next.byte_range().start, format!("{keywords} "));
        }
        if let Some(last_new) = rest.last() {
            return TextEdit::insert(last_new.byte_range().end, format!(" {keywords}"));
        }
        let start = parent
            .tokens()
            .into_iter()
            .find(|token| !token.is(SyntaxKind::AttributeList) && token.raw_kind() != "comment")
            .map_or(parent.byte_range().start, |token| token.byte_range().start);
        TextEdit::insert(start, format!("{keywords} "))
    }
}
