use crate::lexer::token::TokenKind;

/// 运算符优先级，从低到高。
///
/// 派生的 `Ord` 就是比较规则：`Lowest < Equals < ... < Call`。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    #[default]
    Lowest,
    /// `==` `!=`
    Equals,
    /// `<` `>`
    LessGreater,
    /// `+` `-`
    Sum,
    /// `*` `/`
    Product,
    /// 一元 `!x` `-x`
    Prefix,
    /// 函数调用 `f(x)`（暂未注册任何规则）
    Call,
}

/// 以 `TokenKind` 为下标的定长表。
///
/// Parser 的前缀规则、中缀规则和优先级表都是它：查表就是一次数组下标访问。
pub(crate) struct RuleTable<T> {
    slots: [Option<T>; TokenKind::COUNT],
}

impl<T: Copy> RuleTable<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: [None; TokenKind::COUNT],
        }
    }

    pub(crate) fn register(&mut self, kind: TokenKind, rule: T) {
        self.slots[kind.index()] = Some(rule);
    }

    pub(crate) fn get(&self, kind: TokenKind) -> Option<T> {
        self.slots[kind.index()]
    }
}
