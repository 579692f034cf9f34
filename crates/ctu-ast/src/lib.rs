pub mod span {
    use serde::Serialize;
    use std::fmt;

    /// Byte range in the source, end exclusive.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
    pub struct Span {
        pub start: u32,
        pub end: u32,
    }

    impl Span {
        pub fn new(start: u32, end: u32) -> Self {
            Self { start, end }
        }
    }

    /// 1-based line and column of a token's first byte.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
    pub struct Loc {
        pub line: u32,
        pub col: u32,
    }

    impl Default for Loc {
        fn default() -> Self {
            Self { line: 1, col: 1 }
        }
    }

    impl fmt::Display for Loc {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}:{}", self.line, self.col)
        }
    }
}

pub mod ast {
    use super::span::Span;
    use indexmap::IndexMap;
    use serde::Serialize;
    use std::fmt;

    /// A parsed source file.
    ///
    /// `types` and `funcs` iterate in declaration order.
    #[derive(Debug, Default, Serialize)]
    pub struct Unit {
        pub imports: Vec<Import>,
        pub types: IndexMap<String, TypeDecl>,
        pub funcs: IndexMap<String, Func>,
    }

    impl Unit {
        pub fn type_decl(&self, name: &str) -> Option<&TypeDecl> {
            self.types.get(name)
        }

        pub fn func(&self, name: &str) -> Option<&Func> {
            self.funcs.get(name)
        }
    }

    /// `a::b::c`, at least one segment. Never resolved by the parser.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct Path(pub Vec<String>);

    impl Path {
        pub fn single(name: impl Into<String>) -> Self {
            Path(vec![name.into()])
        }
    }

    impl fmt::Display for Path {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0.join("::"))
        }
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct Import {
        pub path: Path,
        pub items: ImportItems,
        pub span: Span,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub enum ImportItems {
        /// `(*)`
        All,
        /// Never empty.
        Names(Vec<String>),
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct Attribute {
        pub name: Path,
        pub args: Vec<Expr>,
        pub span: Span,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub enum TypeDeclKind {
        /// `type name = T;`
        Alias,
        /// `struct name(...)`
        Struct,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct TypeDecl {
        pub name: String,
        pub kind: TypeDeclKind,
        pub ty: Type,
        pub attrs: Vec<Attribute>,
        pub span: Span,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub enum Builtin {
        U8,
        U16,
        U32,
        U64,
        I8,
        I16,
        I32,
        I64,
        F32,
        F64,
        Int,
        Uint,
        Bool,
        Void,
    }

    impl Builtin {
        pub const ALL: [Builtin; 14] = [
            Builtin::U8,
            Builtin::U16,
            Builtin::U32,
            Builtin::U64,
            Builtin::I8,
            Builtin::I16,
            Builtin::I32,
            Builtin::I64,
            Builtin::F32,
            Builtin::F64,
            Builtin::Int,
            Builtin::Uint,
            Builtin::Bool,
            Builtin::Void,
        ];

        pub fn from_name(name: &str) -> Option<Builtin> {
            Self::ALL.into_iter().find(|b| b.name() == name)
        }

        pub fn name(self) -> &'static str {
            match self {
                Builtin::U8 => "u8",
                Builtin::U16 => "u16",
                Builtin::U32 => "u32",
                Builtin::U64 => "u64",
                Builtin::I8 => "i8",
                Builtin::I16 => "i16",
                Builtin::I32 => "i32",
                Builtin::I64 => "i64",
                Builtin::F32 => "f32",
                Builtin::F64 => "f64",
                Builtin::Int => "int",
                Builtin::Uint => "uint",
                Builtin::Bool => "bool",
                Builtin::Void => "void",
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub enum Type {
        Builtin(Builtin),
        Named(Path),
        Mutable(Box<Type>),
        Pointer(Box<Type>),
        /// Size is an integer literal or a name; evaluated later.
        Array {
            elem: Box<Type>,
            size: Box<Expr>,
        },
        Tuple(Vec<Type>),
        Struct(Vec<Field>),
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct Field {
        pub ty: Type,
        pub name: String,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct Func {
        pub name: String,
        pub params: Vec<Param>,
        /// `None` when the return type is left to inference.
        pub ret: Option<Type>,
        pub body: FuncBody,
        pub attrs: Vec<Attribute>,
        pub span: Span,
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct Param {
        pub ty: Type,
        pub name: String,
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub enum FuncBody {
        /// `= expr;`
        Expr(Expr),
        Block(Vec<Stmt>),
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub enum Stmt {
        Block(Vec<Stmt>),
        If {
            cond: Expr,
            then_: Box<Stmt>,
            else_: Option<Box<Stmt>>,
        },
        While {
            cond: Expr,
            body: Box<Stmt>,
        },
        DoWhile {
            body: Box<Stmt>,
            cond: Expr,
        },
        /// `init` and `step` are `Var` or `Expr` statements.
        For {
            init: Option<Box<Stmt>>,
            cond: Option<Expr>,
            step: Option<Box<Stmt>>,
            body: Box<Stmt>,
        },
        Switch {
            scrutinee: Expr,
            cases: Vec<Case>,
            default: Option<Vec<Stmt>>,
        },
        Match {
            scrutinee: Expr,
            arms: Vec<MatchArm>,
        },
        Break,
        Continue,
        Return(Option<Expr>),
        /// `var` declares a mutable binding, `let` an immutable one.
        Var {
            mutable: bool,
            name: String,
            ty: Option<Type>,
            init: Option<Expr>,
        },
        Expr(Expr),
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct Case {
        pub value: Expr,
        pub body: Vec<Stmt>,
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct MatchArm {
        /// `None` for the `default` arm.
        pub pattern: Option<Expr>,
        pub body: Stmt,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub enum Base {
        Bin,
        Dec,
        Hex,
    }

    impl Base {
        pub fn radix(self) -> u32 {
            match self {
                Base::Bin => 2,
                Base::Dec => 10,
                Base::Hex => 16,
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub enum Expr {
        Int {
            value: u64,
            base: Base,
        },
        Float(f64),
        Str(String),
        Bool(bool),
        Name(Path),
        Unary {
            op: UnOp,
            expr: Box<Expr>,
        },
        Binary {
            lhs: Box<Expr>,
            op: BinOp,
            rhs: Box<Expr>,
        },
        Call {
            callee: Box<Expr>,
            args: Vec<Expr>,
        },
        Cast {
            expr: Box<Expr>,
            ty: Type,
        },
        Index {
            base: Box<Expr>,
            index: Box<Expr>,
        },
        Field {
            base: Box<Expr>,
            field: String,
        },
    }

    impl Expr {
        pub fn name(name: impl Into<String>) -> Expr {
            Expr::Name(Path::single(name))
        }

        pub fn int(value: u64) -> Expr {
            Expr::Int {
                value,
                base: Base::Dec,
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub enum UnOp {
        Not,
        Neg,
        Deref,
        AddrOf,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub enum BinOp {
        // assignment
        Assign,
        AddAssign,
        SubAssign,
        MulAssign,
        DivAssign,
        ModAssign,
        // logical
        Or,
        And,
        // equality
        Eq,
        Ne,
        // relational
        Lt,
        Le,
        Gt,
        Ge,
        // arithmetic
        Add,
        Sub,
        Mul,
        Div,
        Mod,
    }
}
