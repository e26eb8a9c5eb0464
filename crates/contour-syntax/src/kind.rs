//! The closed set of C# node kinds the matchers reason about.
//!
//! Tree-sitter identifies node kinds by string. Matchers dispatch on
//! [`SyntaxKind`] instead so every shape decision is an exhaustive `match`
//! over a known set; grammar kinds outside the set collapse to
//! [`SyntaxKind::Unknown`].

use std::fmt;

macro_rules! syntax_kinds {
    ($($(#[$doc:meta])* $variant:ident => $raw:literal,)+) => {
        /// A C# syntax node kind.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[non_exhaustive]
        pub enum SyntaxKind {
            $($(#[$doc])* $variant,)+
            /// Any grammar kind not listed above.
            Unknown,
        }

        impl SyntaxKind {
            /// Maps a Tree-sitter kind name onto the closed kind set.
            #[must_use]
            pub fn from_raw(raw: &str) -> Self {
                match raw {
                    $($raw => Self::$variant,)+
                    _ => Self::Unknown,
                }
            }

            /// Returns the Tree-sitter kind name, or `"unknown"`.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $raw,)+
                    Self::Unknown => "unknown",
                }
            }
        }
    };
}

syntax_kinds! {
    /// The root of a file.
    CompilationUnit => "compilation_unit",
    /// A top-level statement.
    GlobalStatement => "global_statement",
    /// `namespace N { ... }`
    NamespaceDeclaration => "namespace_declaration",
    /// `namespace N;`
    FileScopedNamespaceDeclaration => "file_scoped_namespace_declaration",
    /// The braced member list of a namespace or type.
    DeclarationList => "declaration_list",
    /// `using System;`
    UsingDirective => "using_directive",
    /// `extern alias A;`
    ExternAliasDirective => "extern_alias_directive",
    /// `class C { }`
    ClassDeclaration => "class_declaration",
    /// `struct S { }`
    StructDeclaration => "struct_declaration",
    /// `interface I { }`
    InterfaceDeclaration => "interface_declaration",
    /// `record R;`
    RecordDeclaration => "record_declaration",
    /// `enum E { }`
    EnumDeclaration => "enum_declaration",
    /// `delegate void D();`
    DelegateDeclaration => "delegate_declaration",
    /// A method declaration.
    MethodDeclaration => "method_declaration",
    /// A constructor declaration.
    ConstructorDeclaration => "constructor_declaration",
    /// A finalizer declaration.
    DestructorDeclaration => "destructor_declaration",
    /// A user-defined operator.
    OperatorDeclaration => "operator_declaration",
    /// A user-defined conversion operator.
    ConversionOperatorDeclaration => "conversion_operator_declaration",
    /// A property declaration.
    PropertyDeclaration => "property_declaration",
    /// An indexer declaration.
    IndexerDeclaration => "indexer_declaration",
    /// An event declaration with accessors.
    EventDeclaration => "event_declaration",
    /// An event field declaration.
    EventFieldDeclaration => "event_field_declaration",
    /// A field declaration.
    FieldDeclaration => "field_declaration",
    /// An enum member.
    EnumMemberDeclaration => "enum_member_declaration",
    /// A local function.
    LocalFunctionStatement => "local_function_statement",
    /// `get`, `set`, `init`, `add` or `remove` with its body.
    AccessorDeclaration => "accessor_declaration",
    /// A single modifier keyword such as `public`.
    Modifier => "modifier",
    /// `[Attr]`
    AttributeList => "attribute_list",
    /// `(int a, int b)`
    ParameterList => "parameter_list",
    /// A formal parameter.
    Parameter => "parameter",
    /// `<T, U>`
    TypeParameterList => "type_parameter_list",
    /// A type parameter inside a type parameter list.
    TypeParameter => "type_parameter",
    /// `where T : class`
    TypeParameterConstraintsClause => "type_parameter_constraints_clause",
    /// A constraint inside a constraint clause.
    TypeParameterConstraint => "type_parameter_constraint",
    /// `new()` inside a constraint clause.
    ConstructorConstraint => "constructor_constraint",
    /// `: Base, IFace`
    BaseList => "base_list",
    /// `=> expr` body.
    ArrowExpressionClause => "arrow_expression_clause",
    /// `{ ... }`
    Block => "block",
    /// A `case`/`default` section of a switch statement.
    SwitchSection => "switch_section",
    /// `expr;`
    ExpressionStatement => "expression_statement",
    /// `if (c) s else s`
    IfStatement => "if_statement",
    /// `int x = 1;`
    LocalDeclarationStatement => "local_declaration_statement",
    /// `return e;`
    ReturnStatement => "return_statement",
    /// `break;`
    BreakStatement => "break_statement",
    /// `checked { }`
    CheckedStatement => "checked_statement",
    /// `continue;`
    ContinueStatement => "continue_statement",
    /// `do s while (c);`
    DoStatement => "do_statement",
    /// `;`
    EmptyStatement => "empty_statement",
    /// `fixed (...) s`
    FixedStatement => "fixed_statement",
    /// `for (...) s`
    ForStatement => "for_statement",
    /// `foreach (...) s`
    ForeachStatement => "foreach_statement",
    /// `goto L;`
    GotoStatement => "goto_statement",
    /// `L: s`
    LabeledStatement => "labeled_statement",
    /// `lock (o) s`
    LockStatement => "lock_statement",
    /// `switch (e) { }`
    SwitchStatement => "switch_statement",
    /// `throw e;`
    ThrowStatement => "throw_statement",
    /// `try { } catch { }`
    TryStatement => "try_statement",
    /// `unsafe { }`
    UnsafeStatement => "unsafe_statement",
    /// `using (r) s`
    UsingStatement => "using_statement",
    /// `while (c) s`
    WhileStatement => "while_statement",
    /// `yield return e;`
    YieldStatement => "yield_statement",
    /// The type and declarators of a local or field declaration.
    VariableDeclaration => "variable_declaration",
    /// `x = 1` inside a variable declaration.
    VariableDeclarator => "variable_declarator",
    /// `= value`
    EqualsValueClause => "equals_value_clause",
    /// `(e)`
    ParenthesizedExpression => "parenthesized_expression",
    /// `a op b`
    BinaryExpression => "binary_expression",
    /// `a = b`, `a += b`, ...
    AssignmentExpression => "assignment_expression",
    /// `c ? a : b`
    ConditionalExpression => "conditional_expression",
    /// `!e`, `-e`, `++e`, ...
    PrefixUnaryExpression => "prefix_unary_expression",
    /// `e++`, `e!`, ...
    PostfixUnaryExpression => "postfix_unary_expression",
    /// `e as T`
    AsExpression => "as_expression",
    /// `e is T`
    IsExpression => "is_expression",
    /// `e is pattern`
    IsPatternExpression => "is_pattern_expression",
    /// A constant pattern such as `null`.
    ConstantPattern => "constant_pattern",
    /// A type pattern such as `string`.
    TypePattern => "type_pattern",
    /// `not pattern`
    NegatedPattern => "negated_pattern",
    /// `f(args)`
    InvocationExpression => "invocation_expression",
    /// `(a, b)` at a call site.
    ArgumentList => "argument_list",
    /// A single call argument.
    Argument => "argument",
    /// `e.Name`
    MemberAccessExpression => "member_access_expression",
    /// `e?.Name`
    ConditionalAccessExpression => "conditional_access_expression",
    /// `x => e`, `(a, b) => { }`
    LambdaExpression => "lambda_expression",
    /// The bare parameter of `x => e`.
    ImplicitParameter => "implicit_parameter",
    /// `(T)e`
    CastExpression => "cast_expression",
    /// A simple name.
    Identifier => "identifier",
    /// `Name<T>`
    GenericName => "generic_name",
    /// `A.B`
    QualifiedName => "qualified_name",
    /// `int`, `string`, ...
    PredefinedType => "predefined_type",
    /// `null`
    NullLiteral => "null_literal",
    /// `true` or `false`
    BooleanLiteral => "boolean_literal",
    /// `42`, `0x2A`
    IntegerLiteral => "integer_literal",
    /// `4.2`
    RealLiteral => "real_literal",
    /// `'c'`
    CharacterLiteral => "character_literal",
    /// `"text"`
    StringLiteral => "string_literal",
    /// `@"text"`
    VerbatimStringLiteral => "verbatim_string_literal",
    /// `"""text"""`
    RawStringLiteral => "raw_string_literal",
    /// `$"text {e}"`
    InterpolatedStringExpression => "interpolated_string_expression",
    /// `{expr}` inside an interpolated string.
    Interpolation => "interpolation",
    /// A region the parser could not make sense of.
    Error => "ERROR",
}

impl SyntaxKind {
    /// Whether this kind is a statement that can appear in a block.
    #[must_use]
    pub const fn is_statement(self) -> bool {
        matches!(
            self,
            Self::Block
                | Self::BreakStatement
                | Self::CheckedStatement
                | Self::ContinueStatement
                | Self::DoStatement
                | Self::EmptyStatement
                | Self::ExpressionStatement
                | Self::FixedStatement
                | Self::ForStatement
                | Self::ForeachStatement
                | Self::GotoStatement
                | Self::IfStatement
                | Self::LabeledStatement
                | Self::LocalDeclarationStatement
                | Self::LocalFunctionStatement
                | Self::LockStatement
                | Self::ReturnStatement
                | Self::SwitchStatement
                | Self::ThrowStatement
                | Self::TryStatement
                | Self::UnsafeStatement
                | Self::UsingStatement
                | Self::WhileStatement
                | Self::YieldStatement
        )
    }

    /// Whether this kind declares a type.
    #[must_use]
    pub const fn is_type_declaration(self) -> bool {
        matches!(
            self,
            Self::ClassDeclaration
                | Self::StructDeclaration
                | Self::InterfaceDeclaration
                | Self::RecordDeclaration
                | Self::EnumDeclaration
                | Self::DelegateDeclaration
        )
    }

    /// Whether this kind can appear in a namespace or type member list.
    #[must_use]
    pub const fn is_member_declaration(self) -> bool {
        self.is_type_declaration()
            || matches!(
                self,
                Self::NamespaceDeclaration
                    | Self::FileScopedNamespaceDeclaration
                    | Self::MethodDeclaration
                    | Self::ConstructorDeclaration
                    | Self::DestructorDeclaration
                    | Self::OperatorDeclaration
                    | Self::ConversionOperatorDeclaration
                    | Self::PropertyDeclaration
                    | Self::IndexerDeclaration
                    | Self::EventDeclaration
                    | Self::EventFieldDeclaration
                    | Self::FieldDeclaration
                    | Self::EnumMemberDeclaration
            )
    }

    /// Whether this kind names a type on its own, as in `x is T`.
    #[must_use]
    pub const fn is_type_name(self) -> bool {
        matches!(
            self,
            Self::PredefinedType | Self::Identifier | Self::QualifiedName | Self::GenericName
        )
    }

    /// Whether this kind can appear inside a `where` clause.
    #[must_use]
    pub const fn is_type_parameter_constraint(self) -> bool {
        matches!(
            self,
            Self::TypeParameterConstraint | Self::ConstructorConstraint
        )
    }

    /// Whether this kind is a non-interpolated string literal.
    #[must_use]
    pub const fn is_string_literal(self) -> bool {
        matches!(
            self,
            Self::StringLiteral | Self::VerbatimStringLiteral | Self::RawStringLiteral
        )
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! operator_tokens {
    ($(#[$enum_doc:meta])* $name:ident { $($(#[$doc:meta])* $variant:ident => $token:literal,)+ }) => {
        $(#[$enum_doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$doc])* $variant,)+
        }

        impl $name {
            /// Decodes an operator token.
            #[must_use]
            pub fn from_token(token: &str) -> Option<Self> {
                match token {
                    $($token => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Returns the operator token.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $token,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

operator_tokens! {
    /// Operator of a `binary_expression`.
    BinaryOperator {
        /// `+`
        Add => "+",
        /// `-`
        Subtract => "-",
        /// `*`
        Multiply => "*",
        /// `/`
        Divide => "/",
        /// `%`
        Modulo => "%",
        /// `<<`
        LeftShift => "<<",
        /// `>>`
        RightShift => ">>",
        /// `>>>`
        UnsignedRightShift => ">>>",
        /// `&&`
        LogicalAnd => "&&",
        /// `||`
        LogicalOr => "||",
        /// `&`
        BitwiseAnd => "&",
        /// `|`
        BitwiseOr => "|",
        /// `^`
        ExclusiveOr => "^",
        /// `==`
        Equals => "==",
        /// `!=`
        NotEquals => "!=",
        /// `<`
        LessThan => "<",
        /// `<=`
        LessThanOrEqual => "<=",
        /// `>`
        GreaterThan => ">",
        /// `>=`
        GreaterThanOrEqual => ">=",
        /// `??`
        Coalesce => "??",
    }
}

operator_tokens! {
    /// Operator of an `assignment_expression`.
    AssignmentOperator {
        /// `=`
        Simple => "=",
        /// `+=`
        Add => "+=",
        /// `-=`
        Subtract => "-=",
        /// `*=`
        Multiply => "*=",
        /// `/=`
        Divide => "/=",
        /// `%=`
        Modulo => "%=",
        /// `&=`
        And => "&=",
        /// `|=`
        Or => "|=",
        /// `^=`
        ExclusiveOr => "^=",
        /// `<<=`
        LeftShift => "<<=",
        /// `>>=`
        RightShift => ">>=",
        /// `>>>=`
        UnsignedRightShift => ">>>=",
        /// `??=`
        Coalesce => "??=",
    }
}

operator_tokens! {
    /// Operator of a `prefix_unary_expression`.
    PrefixOperator {
        /// `!`
        LogicalNot => "!",
        /// `-`
        Negate => "-",
        /// `+`
        Plus => "+",
        /// `~`
        BitwiseNot => "~",
        /// `++`
        Increment => "++",
        /// `--`
        Decrement => "--",
        /// `&`
        AddressOf => "&",
        /// `*`
        Indirection => "*",
        /// `^`
        IndexFromEnd => "^",
    }
}
