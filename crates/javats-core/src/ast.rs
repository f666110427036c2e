//! Declaration tree handed over by the Java front end
//!
//! The tree is a closed set of tagged unions. Every node kind the printer
//! understands has exactly one variant, so traversals are exhaustive `match`es.
//! Nodes do not point back at their parents: the enclosing chain of a
//! declaration is tracked by whoever walks the tree.
//!
//! All types are `serde`-deserializable so a parser running out of process can
//! hand the tree over as JSON.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ============================================================================
// Compilation unit
// ============================================================================

/// One parsed `.java` file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompilationUnit {
    #[serde(default)]
    pub comment: Option<Comment>,
    #[serde(default)]
    pub package: Option<PackageDecl>,
    #[serde(default)]
    pub imports: Vec<ImportDecl>,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
    /// Comments after the last declaration
    #[serde(default)]
    pub trailing_comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageDecl {
    /// Dotted package name, e.g. `android.widget`
    pub name: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportDecl {
    /// Dotted name without the trailing `.*`
    pub name: String,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_asterisk: bool,
    #[serde(default)]
    pub comment: Option<Comment>,
}

impl CompilationUnit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, name: impl Into<String>) -> Self {
        self.package = Some(PackageDecl {
            name: name.into(),
            annotations: Vec::new(),
        });
        self
    }

    pub fn with_import(mut self, import: ImportDecl) -> Self {
        self.imports.push(import);
        self
    }

    pub fn with_type(mut self, decl: impl Into<TypeDecl>) -> Self {
        self.types.push(decl.into());
        self
    }

    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comment = Some(comment);
        self
    }

    pub fn package_name(&self) -> Option<&str> {
        self.package.as_ref().map(|p| p.name.as_str())
    }
}

impl ImportDecl {
    /// Single-type import: `import a.b.C;`
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_static: false,
            is_asterisk: false,
            comment: None,
        }
    }

    /// On-demand import: `import a.b.*;`
    pub fn wildcard(name: impl Into<String>) -> Self {
        Self {
            is_asterisk: true,
            ..Self::single(name)
        }
    }

    pub fn static_member(name: impl Into<String>) -> Self {
        Self {
            is_static: true,
            ..Self::single(name)
        }
    }

    /// Last dotted segment of the imported name
    pub fn identifier(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

// ============================================================================
// Comments and annotations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentKind {
    Line,
    Block,
    Javadoc,
}

/// A source comment; `content` excludes the delimiters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub kind: CommentKind,
    pub content: String,
}

impl Comment {
    pub fn line(content: impl Into<String>) -> Self {
        Self {
            kind: CommentKind::Line,
            content: content.into(),
        }
    }

    pub fn block(content: impl Into<String>) -> Self {
        Self {
            kind: CommentKind::Block,
            content: content.into(),
        }
    }

    pub fn javadoc(content: impl Into<String>) -> Self {
        Self {
            kind: CommentKind::Javadoc,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub name: String,
    #[serde(default)]
    pub arguments: AnnotationArguments,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnnotationArguments {
    /// `@Override`
    #[default]
    Marker,
    /// `@SuppressWarnings("x")`
    Single { value: Box<Expr> },
    /// `@Retention(value = RUNTIME, x = 1)`
    Normal { pairs: Vec<MemberValuePair> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberValuePair {
    pub name: String,
    pub value: Expr,
}

impl Annotation {
    pub fn marker(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: AnnotationArguments::Marker,
        }
    }

    pub fn single(name: impl Into<String>, value: Expr) -> Self {
        Self {
            name: name.into(),
            arguments: AnnotationArguments::Single {
                value: Box::new(value),
            },
        }
    }

    pub fn normal(name: impl Into<String>, pairs: Vec<(&str, Expr)>) -> Self {
        Self {
            name: name.into(),
            arguments: AnnotationArguments::Normal {
                pairs: pairs
                    .into_iter()
                    .map(|(name, value)| MemberValuePair {
                        name: name.to_string(),
                        value,
                    })
                    .collect(),
            },
        }
    }
}

// ============================================================================
// Modifiers
// ============================================================================

/// Java modifier keywords, declared in the order `javac` reports them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Static,
    Final,
    Transient,
    Volatile,
    Synchronized,
    Native,
    Strictfp,
    Transitive,
    Default,
}

impl Modifier {
    pub fn keyword(&self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Abstract => "abstract",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Transient => "transient",
            Modifier::Volatile => "volatile",
            Modifier::Synchronized => "synchronized",
            Modifier::Native => "native",
            Modifier::Strictfp => "strictfp",
            Modifier::Transitive => "transitive",
            Modifier::Default => "default",
        }
    }
}

pub type Modifiers = BTreeSet<Modifier>;

fn modifier_set(modifiers: &[Modifier]) -> Modifiers {
    modifiers.iter().copied().collect()
}

// ============================================================================
// Type declarations
// ============================================================================

/// A class, interface, enum or annotation type declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDecl {
    Class(ClassDecl),
    Enum(EnumDecl),
    Annotation(AnnotationDecl),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub name: String,
    #[serde(default)]
    pub is_interface: bool,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub comment: Option<Comment>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default)]
    pub extended_types: Vec<ClassType>,
    #[serde(default)]
    pub implemented_types: Vec<ClassType>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub trailing_comments: Vec<Comment>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumDecl {
    pub name: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub comment: Option<Comment>,
    #[serde(default)]
    pub implemented_types: Vec<ClassType>,
    #[serde(default)]
    pub entries: Vec<EnumConstant>,
    #[serde(default)]
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumConstant {
    pub name: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub comment: Option<Comment>,
    #[serde(default)]
    pub arguments: Vec<Expr>,
    #[serde(default)]
    pub class_body: Vec<Member>,
}

/// `@interface Name { ... }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationDecl {
    pub name: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub comment: Option<Comment>,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl TypeDecl {
    pub fn name(&self) -> &str {
        match self {
            TypeDecl::Class(c) => &c.name,
            TypeDecl::Enum(e) => &e.name,
            TypeDecl::Annotation(a) => &a.name,
        }
    }

    pub fn modifiers(&self) -> &Modifiers {
        match self {
            TypeDecl::Class(c) => &c.modifiers,
            TypeDecl::Enum(e) => &e.modifiers,
            TypeDecl::Annotation(a) => &a.modifiers,
        }
    }

    pub fn annotations(&self) -> &[Annotation] {
        match self {
            TypeDecl::Class(c) => &c.annotations,
            TypeDecl::Enum(e) => &e.annotations,
            TypeDecl::Annotation(a) => &a.annotations,
        }
    }

    pub fn comment(&self) -> Option<&Comment> {
        match self {
            TypeDecl::Class(c) => c.comment.as_ref(),
            TypeDecl::Enum(e) => e.comment.as_ref(),
            TypeDecl::Annotation(a) => a.comment.as_ref(),
        }
    }

    /// Annotation types are interfaces as far as the type system is concerned
    pub fn is_interface(&self) -> bool {
        match self {
            TypeDecl::Class(c) => c.is_interface,
            TypeDecl::Enum(_) => false,
            TypeDecl::Annotation(_) => true,
        }
    }

    pub fn is_static(&self) -> bool {
        self.modifiers().contains(&Modifier::Static)
    }

    pub fn members(&self) -> &[Member] {
        match self {
            TypeDecl::Class(c) => &c.members,
            TypeDecl::Enum(e) => &e.members,
            TypeDecl::Annotation(a) => &a.members,
        }
    }

    /// Type declarations directly nested in this one, in source order
    pub fn nested_types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.members().iter().filter_map(|m| match m {
            Member::Type(t) => Some(t),
            _ => None,
        })
    }
}

impl From<ClassDecl> for TypeDecl {
    fn from(decl: ClassDecl) -> Self {
        TypeDecl::Class(decl)
    }
}

impl From<EnumDecl> for TypeDecl {
    fn from(decl: EnumDecl) -> Self {
        TypeDecl::Enum(decl)
    }
}

impl From<AnnotationDecl> for TypeDecl {
    fn from(decl: AnnotationDecl) -> Self {
        TypeDecl::Annotation(decl)
    }
}

impl ClassDecl {
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_interface: true,
            ..Default::default()
        }
    }

    pub fn with_modifiers(mut self, modifiers: &[Modifier]) -> Self {
        self.modifiers = modifier_set(modifiers);
        self
    }

    pub fn with_javadoc(mut self, content: impl Into<String>) -> Self {
        self.comment = Some(Comment::javadoc(content));
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_type_parameter(mut self, param: TypeParameter) -> Self {
        self.type_parameters.push(param);
        self
    }

    pub fn extending(mut self, ty: ClassType) -> Self {
        self.extended_types.push(ty);
        self
    }

    pub fn implementing(mut self, ty: ClassType) -> Self {
        self.implemented_types.push(ty);
        self
    }

    pub fn with_member(mut self, member: impl Into<Member>) -> Self {
        self.members.push(member.into());
        self
    }
}

impl EnumDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_modifiers(mut self, modifiers: &[Modifier]) -> Self {
        self.modifiers = modifier_set(modifiers);
        self
    }

    pub fn with_entry(mut self, name: impl Into<String>) -> Self {
        self.entries.push(EnumConstant {
            name: name.into(),
            ..Default::default()
        });
        self
    }

    pub fn with_member(mut self, member: impl Into<Member>) -> Self {
        self.members.push(member.into());
        self
    }
}

impl AnnotationDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_modifiers(mut self, modifiers: &[Modifier]) -> Self {
        self.modifiers = modifier_set(modifiers);
        self
    }

    pub fn with_member(mut self, member: impl Into<Member>) -> Self {
        self.members.push(member.into());
        self
    }
}

// ============================================================================
// Members
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum Member {
    Type(TypeDecl),
    Field(FieldDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    Initializer(InitializerDecl),
    AnnotationMember(AnnotationMemberDecl),
}

impl Member {
    pub fn is_type(&self) -> bool {
        matches!(self, Member::Type(_))
    }
}

impl From<TypeDecl> for Member {
    fn from(decl: TypeDecl) -> Self {
        Member::Type(decl)
    }
}

impl From<ClassDecl> for Member {
    fn from(decl: ClassDecl) -> Self {
        Member::Type(TypeDecl::Class(decl))
    }
}

impl From<EnumDecl> for Member {
    fn from(decl: EnumDecl) -> Self {
        Member::Type(TypeDecl::Enum(decl))
    }
}

impl From<FieldDecl> for Member {
    fn from(decl: FieldDecl) -> Self {
        Member::Field(decl)
    }
}

impl From<MethodDecl> for Member {
    fn from(decl: MethodDecl) -> Self {
        Member::Method(decl)
    }
}

impl From<ConstructorDecl> for Member {
    fn from(decl: ConstructorDecl) -> Self {
        Member::Constructor(decl)
    }
}

impl From<InitializerDecl> for Member {
    fn from(decl: InitializerDecl) -> Self {
        Member::Initializer(decl)
    }
}

impl From<AnnotationMemberDecl> for Member {
    fn from(decl: AnnotationMemberDecl) -> Self {
        Member::AnnotationMember(decl)
    }
}

/// `int a, b[] = ...;`: one base type shared by every declarator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub comment: Option<Comment>,
    pub base_type: Type,
    pub variables: Vec<VariableDeclarator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclarator {
    pub name: String,
    /// Per-variable `[]` suffixes beyond the shared base type (`int a[][]`)
    #[serde(default)]
    pub extra_dimensions: Vec<ArrayLevel>,
    #[serde(default)]
    pub initializer: Option<Expr>,
}

/// One `[]` in a type, with the annotations written before it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayLevel {
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub comment: Option<Comment>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    pub return_type: Type,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub thrown_exceptions: Vec<Type>,
    /// `None` for abstract and interface methods
    #[serde(default)]
    pub body: Option<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorDecl {
    pub name: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub comment: Option<Comment>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub thrown_exceptions: Vec<Type>,
    #[serde(default)]
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitializerDecl {
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub comment: Option<Comment>,
    pub body: Block,
}

/// `int value() default 1;` inside an `@interface`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationMemberDecl {
    pub name: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub comment: Option<Comment>,
    #[serde(rename = "type")]
    pub ty: Type,
    #[serde(default)]
    pub default_value: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub is_var_args: bool,
    #[serde(default)]
    pub var_args_annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeParameter {
    pub name: String,
    #[serde(default)]
    pub bounds: Vec<ClassType>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl FieldDecl {
    pub fn new(modifiers: &[Modifier], base_type: Type, variables: Vec<VariableDeclarator>) -> Self {
        Self {
            modifiers: modifier_set(modifiers),
            annotations: Vec::new(),
            comment: None,
            base_type,
            variables,
        }
    }

    /// Field with a single declarator
    pub fn single(modifiers: &[Modifier], base_type: Type, name: impl Into<String>) -> Self {
        Self::new(modifiers, base_type, vec![VariableDeclarator::new(name)])
    }

    pub fn initialized(
        modifiers: &[Modifier],
        base_type: Type,
        name: impl Into<String>,
        init: Expr,
    ) -> Self {
        Self::new(
            modifiers,
            base_type,
            vec![VariableDeclarator::new(name).with_initializer(init)],
        )
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comment = Some(comment);
        self
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(&Modifier::Static)
    }
}

impl VariableDeclarator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra_dimensions: Vec::new(),
            initializer: None,
        }
    }

    pub fn with_initializer(mut self, init: Expr) -> Self {
        self.initializer = Some(init);
        self
    }

    pub fn with_extra_dimensions(mut self, count: usize) -> Self {
        self.extra_dimensions = vec![ArrayLevel::default(); count];
        self
    }
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, return_type: Type) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::new(),
            annotations: Vec::new(),
            comment: None,
            type_parameters: Vec::new(),
            return_type,
            parameters: Vec::new(),
            thrown_exceptions: Vec::new(),
            body: None,
        }
    }

    pub fn with_modifiers(mut self, modifiers: &[Modifier]) -> Self {
        self.modifiers = modifier_set(modifiers);
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_javadoc(mut self, content: impl Into<String>) -> Self {
        self.comment = Some(Comment::javadoc(content));
        self
    }

    pub fn with_type_parameter(mut self, param: TypeParameter) -> Self {
        self.type_parameters.push(param);
        self
    }

    pub fn with_parameter(mut self, param: Parameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn throwing(mut self, ty: Type) -> Self {
        self.thrown_exceptions.push(ty);
        self
    }

    pub fn with_body(mut self, body: Block) -> Self {
        self.body = Some(body);
        self
    }
}

impl ConstructorDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::new(),
            annotations: Vec::new(),
            comment: None,
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            thrown_exceptions: Vec::new(),
            body: Block::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: &[Modifier]) -> Self {
        self.modifiers = modifier_set(modifiers);
        self
    }

    pub fn with_parameter(mut self, param: Parameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn throwing(mut self, ty: Type) -> Self {
        self.thrown_exceptions.push(ty);
        self
    }

    pub fn with_body(mut self, body: Block) -> Self {
        self.body = body;
        self
    }
}

impl InitializerDecl {
    pub fn new(is_static: bool, body: Block) -> Self {
        Self {
            is_static,
            comment: None,
            body,
        }
    }
}

impl AnnotationMemberDecl {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::new(),
            annotations: Vec::new(),
            comment: None,
            ty,
            default_value: None,
        }
    }

    pub fn with_default(mut self, value: Expr) -> Self {
        self.default_value = Some(value);
        self
    }
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            modifiers: Modifiers::new(),
            annotations: Vec::new(),
            is_var_args: false,
            var_args_annotations: Vec::new(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: &[Modifier]) -> Self {
        self.modifiers = modifier_set(modifiers);
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn var_args(mut self) -> Self {
        self.is_var_args = true;
        self
    }
}

impl TypeParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn bounded_by(mut self, bound: ClassType) -> Self {
        self.bounds.push(bound);
        self
    }
}

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
}

impl Primitive {
    pub const ALL: [Primitive; 8] = [
        Primitive::Boolean,
        Primitive::Byte,
        Primitive::Short,
        Primitive::Int,
        Primitive::Long,
        Primitive::Float,
        Primitive::Double,
        Primitive::Char,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Char => "char",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    Primitive {
        primitive: Primitive,
        #[serde(default)]
        annotations: Vec<Annotation>,
    },
    Class(ClassType),
    Array {
        component: Box<Type>,
        #[serde(default)]
        annotations: Vec<Annotation>,
    },
    Void {
        #[serde(default)]
        annotations: Vec<Annotation>,
    },
    Intersection {
        elements: Vec<Type>,
    },
    Union {
        elements: Vec<Type>,
    },
    Wildcard {
        #[serde(default)]
        extends: Option<Box<Type>>,
        #[serde(default)]
        super_bound: Option<Box<Type>>,
        #[serde(default)]
        annotations: Vec<Annotation>,
    },
    /// Implicitly typed lambda parameter
    Unknown,
}

/// `scope.Name<Args>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassType {
    #[serde(default)]
    pub scope: Option<Box<ClassType>>,
    pub name: String,
    /// `Some(vec![])` is the diamond operator
    #[serde(default)]
    pub type_arguments: Option<Vec<Type>>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl Type {
    pub fn primitive(primitive: Primitive) -> Self {
        Type::Primitive {
            primitive,
            annotations: Vec::new(),
        }
    }

    pub fn boolean() -> Self {
        Self::primitive(Primitive::Boolean)
    }

    pub fn int() -> Self {
        Self::primitive(Primitive::Int)
    }

    pub fn long() -> Self {
        Self::primitive(Primitive::Long)
    }

    pub fn double() -> Self {
        Self::primitive(Primitive::Double)
    }

    pub fn void() -> Self {
        Type::Void {
            annotations: Vec::new(),
        }
    }

    /// Class type from a (possibly dotted) name: `Outer.Inner` becomes a scoped reference
    pub fn class(name: &str) -> Self {
        Type::Class(ClassType::parse(name))
    }

    pub fn array(component: Type, dimensions: usize) -> Self {
        (0..dimensions).fold(component, |inner, _| Type::Array {
            component: Box::new(inner),
            annotations: Vec::new(),
        })
    }

    /// Number of `[]` wrapped around the element type
    pub fn array_level(&self) -> usize {
        match self {
            Type::Array { component, .. } => 1 + component.array_level(),
            _ => 0,
        }
    }

    /// Innermost non-array type
    pub fn element_type(&self) -> &Type {
        match self {
            Type::Array { component, .. } => component.element_type(),
            other => other,
        }
    }
}

impl From<ClassType> for Type {
    fn from(ty: ClassType) -> Self {
        Type::Class(ty)
    }
}

impl ClassType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            scope: None,
            name: name.into(),
            type_arguments: None,
            annotations: Vec::new(),
        }
    }

    /// Split a dotted reference into a chain of scoped class types
    pub fn parse(dotted: &str) -> Self {
        let mut segments = dotted.split('.');
        let first = Self::new(segments.next().unwrap_or_default());
        segments.fold(first, |scope, name| Self {
            scope: Some(Box::new(scope)),
            ..Self::new(name)
        })
    }

    pub fn with_type_arguments(mut self, args: Vec<Type>) -> Self {
        self.type_arguments = Some(args);
        self
    }

    pub fn diamond(mut self) -> Self {
        self.type_arguments = Some(Vec::new());
        self
    }

    pub fn is_diamond(&self) -> bool {
        matches!(&self.type_arguments, Some(args) if args.is_empty())
    }

    /// Segments from the leftmost scope to this name
    pub fn segments(&self) -> Vec<&str> {
        let mut segments = match &self.scope {
            Some(scope) => scope.segments(),
            None => Vec::new(),
        };
        segments.push(&self.name);
        segments
    }

    /// Leftmost scope segment (the only one resolved lexically)
    pub fn root(&self) -> &ClassType {
        match &self.scope {
            Some(scope) => scope.root(),
            None => self,
        }
    }

    pub fn dotted(&self) -> String {
        self.segments().join(".")
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub statements: Vec<Statement>,
    /// Comments after the last statement
    #[serde(default)]
    pub trailing_comments: Vec<Comment>,
}

impl Block {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self {
            statements,
            trailing_comments: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchEntry {
    /// `None` is the `default:` label
    #[serde(default)]
    pub label: Option<Expr>,
    #[serde(default)]
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchClause {
    pub parameter: Parameter,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stmt", rename_all = "snake_case")]
pub enum Statement {
    Block(Block),
    Expression {
        expr: Expr,
    },
    /// Class, interface or enum declared inside a method body
    LocalClass(TypeDecl),
    Assert {
        check: Expr,
        #[serde(default)]
        message: Option<Expr>,
    },
    Labeled {
        label: String,
        statement: Box<Statement>,
    },
    Empty,
    Switch {
        selector: Expr,
        #[serde(default)]
        entries: Vec<SwitchEntry>,
    },
    Break {
        #[serde(default)]
        label: Option<String>,
    },
    Continue {
        #[serde(default)]
        label: Option<String>,
    },
    Return {
        #[serde(default)]
        expr: Option<Expr>,
    },
    If {
        condition: Expr,
        then: Box<Statement>,
        #[serde(default)]
        otherwise: Option<Box<Statement>>,
    },
    While {
        condition: Expr,
        body: Box<Statement>,
    },
    Do {
        body: Box<Statement>,
        condition: Expr,
    },
    ForEach {
        variable: VariableDeclarationExpr,
        iterable: Expr,
        body: Box<Statement>,
    },
    For {
        #[serde(default)]
        init: Vec<Expr>,
        #[serde(default)]
        compare: Option<Expr>,
        #[serde(default)]
        update: Vec<Expr>,
        body: Box<Statement>,
    },
    Throw {
        expr: Expr,
    },
    Synchronized {
        lock: Expr,
        body: Block,
    },
    Try {
        #[serde(default)]
        resources: Vec<VariableDeclarationExpr>,
        block: Block,
        #[serde(default)]
        catches: Vec<CatchClause>,
        #[serde(default)]
        finally: Option<Block>,
    },
    /// `this(...)` or `[expr.]super(...)` as the first constructor statement
    ExplicitConstructorInvocation {
        is_this: bool,
        #[serde(default)]
        expr: Option<Expr>,
        #[serde(default)]
        type_arguments: Vec<Type>,
        #[serde(default)]
        arguments: Vec<Expr>,
    },
    /// Free-standing comment between statements
    Comment(Comment),
    Unparsable,
}

impl Statement {
    pub fn expr(expr: Expr) -> Self {
        Statement::Expression { expr }
    }

    pub fn ret(expr: Option<Expr>) -> Self {
        Statement::Return { expr }
    }

    pub fn local(var: VariableDeclarationExpr) -> Self {
        Statement::Expression {
            expr: Expr::VariableDeclaration(var),
        }
    }
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Or,
    And,
    BinOr,
    BinAnd,
    Xor,
    Equals,
    NotEquals,
    Less,
    Greater,
    LessEquals,
    GreaterEquals,
    LeftShift,
    SignedRightShift,
    UnsignedRightShift,
    Plus,
    Minus,
    Multiply,
    Divide,
    Remainder,
}

impl BinaryOp {
    /// Java spelling of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::BinOr => "|",
            BinaryOp::BinAnd => "&",
            BinaryOp::Xor => "^",
            BinaryOp::Equals => "==",
            BinaryOp::NotEquals => "!=",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::LessEquals => "<=",
            BinaryOp::GreaterEquals => ">=",
            BinaryOp::LeftShift => "<<",
            BinaryOp::SignedRightShift => ">>",
            BinaryOp::UnsignedRightShift => ">>>",
            BinaryOp::Plus => "+",
            BinaryOp::Minus => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Remainder => "%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignOp {
    Assign,
    Plus,
    Minus,
    Multiply,
    Divide,
    BinAnd,
    BinOr,
    Xor,
    Remainder,
    LeftShift,
    SignedRightShift,
    UnsignedRightShift,
}

impl AssignOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::Plus => "+=",
            AssignOp::Minus => "-=",
            AssignOp::Multiply => "*=",
            AssignOp::Divide => "/=",
            AssignOp::BinAnd => "&=",
            AssignOp::BinOr => "|=",
            AssignOp::Xor => "^=",
            AssignOp::Remainder => "%=",
            AssignOp::LeftShift => "<<=",
            AssignOp::SignedRightShift => ">>=",
            AssignOp::UnsignedRightShift => ">>>=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    Plus,
    Minus,
    PrefixIncrement,
    PrefixDecrement,
    LogicalComplement,
    BitwiseComplement,
    PostfixIncrement,
    PostfixDecrement,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::PrefixIncrement | UnaryOp::PostfixIncrement => "++",
            UnaryOp::PrefixDecrement | UnaryOp::PostfixDecrement => "--",
            UnaryOp::LogicalComplement => "!",
            UnaryOp::BitwiseComplement => "~",
        }
    }

    pub fn is_postfix(&self) -> bool {
        matches!(self, UnaryOp::PostfixIncrement | UnaryOp::PostfixDecrement)
    }
}

/// `final int a = 1, b[];` as a statement, `for` initializer or resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclarationExpr {
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    pub base_type: Type,
    pub variables: Vec<VariableDeclarator>,
}

impl VariableDeclarationExpr {
    pub fn new(modifiers: &[Modifier], base_type: Type, variables: Vec<VariableDeclarator>) -> Self {
        Self {
            modifiers: modifier_set(modifiers),
            annotations: Vec::new(),
            base_type,
            variables,
        }
    }

    pub fn single(base_type: Type, name: impl Into<String>, init: Option<Expr>) -> Self {
        let mut var = VariableDeclarator::new(name);
        var.initializer = init;
        Self::new(&[], base_type, vec![var])
    }

    pub fn is_final(&self) -> bool {
        self.modifiers.contains(&Modifier::Final)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayCreationLevel {
    #[serde(default)]
    pub dimension: Option<Expr>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LambdaBody {
    Expression { expr: Box<Expr> },
    Block(Block),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    Name {
        name: String,
    },
    FieldAccess {
        scope: Box<Expr>,
        name: String,
    },
    ArrayAccess {
        array: Box<Expr>,
        index: Box<Expr>,
    },
    ArrayCreation {
        element_type: Type,
        levels: Vec<ArrayCreationLevel>,
        #[serde(default)]
        initializer: Option<Vec<Expr>>,
    },
    ArrayInitializer {
        values: Vec<Expr>,
    },
    Assign {
        target: Box<Expr>,
        op: AssignOp,
        value: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Cast {
        #[serde(rename = "type")]
        ty: Type,
        expr: Box<Expr>,
    },
    /// `Foo.class`
    Class {
        #[serde(rename = "type")]
        ty: Type,
    },
    Conditional {
        condition: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    Enclosed {
        inner: Box<Expr>,
    },
    InstanceOf {
        expr: Box<Expr>,
        #[serde(rename = "type")]
        ty: Type,
    },
    IntegerLiteral {
        value: String,
    },
    LongLiteral {
        value: String,
    },
    DoubleLiteral {
        value: String,
    },
    CharLiteral {
        value: String,
    },
    StringLiteral {
        value: String,
    },
    BooleanLiteral {
        value: bool,
    },
    NullLiteral,
    /// `this` or `Outer.this`
    This {
        #[serde(default)]
        qualifier: Option<String>,
    },
    Super {
        #[serde(default)]
        qualifier: Option<String>,
    },
    MethodCall {
        #[serde(default)]
        scope: Option<Box<Expr>>,
        #[serde(default)]
        type_arguments: Vec<Type>,
        name: String,
        #[serde(default)]
        arguments: Vec<Expr>,
    },
    /// `[scope.]new T(args) [{ body }]`
    ObjectCreation {
        #[serde(default)]
        scope: Option<Box<Expr>>,
        #[serde(rename = "type")]
        ty: ClassType,
        #[serde(default)]
        type_arguments: Vec<Type>,
        #[serde(default)]
        arguments: Vec<Expr>,
        #[serde(default)]
        anonymous_body: Option<Vec<Member>>,
    },
    Lambda {
        parameters: Vec<Parameter>,
        #[serde(default)]
        enclosing_parameters: bool,
        body: LambdaBody,
    },
    MethodReference {
        scope: Box<Expr>,
        #[serde(default)]
        type_arguments: Vec<Type>,
        identifier: String,
    },
    /// A type used in expression position (`String::valueOf` scope)
    TypeExpr {
        #[serde(rename = "type")]
        ty: Type,
    },
    VariableDeclaration(VariableDeclarationExpr),
    Annotation(Annotation),
}

impl Expr {
    pub fn name(name: impl Into<String>) -> Self {
        Expr::Name { name: name.into() }
    }

    pub fn int(value: impl Into<String>) -> Self {
        Expr::IntegerLiteral {
            value: value.into(),
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::StringLiteral {
            value: value.into(),
        }
    }

    pub fn boolean(value: bool) -> Self {
        Expr::BooleanLiteral { value }
    }

    pub fn this() -> Self {
        Expr::This { qualifier: None }
    }

    pub fn field(scope: Expr, name: impl Into<String>) -> Self {
        Expr::FieldAccess {
            scope: Box::new(scope),
            name: name.into(),
        }
    }

    pub fn call(scope: Option<Expr>, name: impl Into<String>, arguments: Vec<Expr>) -> Self {
        Expr::MethodCall {
            scope: scope.map(Box::new),
            type_arguments: Vec::new(),
            name: name.into(),
            arguments,
        }
    }

    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        Expr::Assign {
            target: Box::new(target),
            op: AssignOp::Assign,
            value: Box::new(value),
        }
    }

    pub fn cast(ty: Type, expr: Expr) -> Self {
        Expr::Cast {
            ty,
            expr: Box::new(expr),
        }
    }

    pub fn new_object(ty: ClassType, arguments: Vec<Expr>) -> Self {
        Expr::ObjectCreation {
            scope: None,
            ty,
            type_arguments: Vec::new(),
            arguments,
            anonymous_body: None,
        }
    }

    pub fn anonymous(ty: ClassType, arguments: Vec<Expr>, body: Vec<Member>) -> Self {
        Expr::ObjectCreation {
            scope: None,
            ty,
            type_arguments: Vec::new(),
            arguments,
            anonymous_body: Some(body),
        }
    }
}
