//! 四則演算式パーサー・評価器
//!
//! 計算式文字列をその場で実行するのではなく、限られた文法だけを受け付ける
//! 再帰下降パーサーで構文木にしてから評価する。
//!
//! 文法:
//! ```text
//! expr    = term (('+' | '-') term)*
//! term    = unary (('*' | '/') unary)*
//! unary   = ('+' | '-') unary | primary
//! primary = number | identifier | '(' expr ')'
//! ```
//!
//! 識別子は `total` / `weight` と役割名（`soy`, `miso`, ...）のみ。
//! 数値は `1.5` / `.5` / `1e-3` の形を受け付ける。

use crate::error::FormulaError;
use crate::types::Role;

/// 入れ子の上限（括弧・単項演算子）
const MAX_DEPTH: usize = 32;

/// 二項演算子の数の上限（構文木の深さを抑える）
const MAX_OPERATORS: usize = 256;

/// 総重量を表す変数名
pub const TOTAL_VARIABLES: [&str; 2] = ["total", "weight"];

/// 計算式中で使える変数名か
pub fn is_known_variable(name: &str) -> bool {
    TOTAL_VARIABLES.contains(&name) || Role::from_variable(name).is_some()
}

/// 変数の値を提供する
pub trait Variables {
    /// 値が割り当てられていなければ `None`
    fn get(&self, name: &str) -> Option<f64>;
}

impl<F> Variables for F
where
    F: Fn(&str) -> Option<f64>,
{
    fn get(&self, name: &str) -> Option<f64> {
        self(name)
    }
}

/// 二項演算子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
            BinaryOp::Div => lhs / rhs,
        }
    }
}

/// 構文木
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(String),
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    /// 式を評価する
    ///
    /// 途中でゼロ除算などにより非有限値になった場合もエラーにする。
    pub fn evaluate(&self, vars: &dyn Variables) -> Result<f64, FormulaError> {
        let value = self.eval_inner(vars)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(FormulaError::NonFinite)
        }
    }

    fn eval_inner(&self, vars: &dyn Variables) -> Result<f64, FormulaError> {
        match self {
            Expr::Number(n) => Ok(*n),
            Expr::Variable(name) => vars
                .get(name)
                .ok_or_else(|| FormulaError::UnboundVariable(name.clone())),
            Expr::Neg(inner) => Ok(-inner.eval_inner(vars)?),
            Expr::Binary { op, lhs, rhs } => {
                let l = lhs.eval_inner(vars)?;
                let r = rhs.eval_inner(vars)?;
                Ok(op.apply(l, r))
            }
        }
    }

    /// 式が参照している変数名（重複なし、出現順）
    pub fn variables(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Expr::Number(_) => {}
            Expr::Variable(name) => {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
            Expr::Neg(inner) => inner.collect_variables(names),
            Expr::Binary { lhs, rhs, .. } => {
                lhs.collect_variables(names);
                rhs.collect_variables(names);
            }
        }
    }

    /// 指定の変数を参照しているか
    pub fn references(&self, name: &str) -> bool {
        self.variables().contains(&name)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(n) => n.to_string(),
            Token::Ident(name) => name.clone(),
            Token::Plus => "+".into(),
            Token::Minus => "-".into(),
            Token::Star => "*".into(),
            Token::Slash => "/".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
        }
    }
}

/// (トークン, 文字位置) の列に分解する
///
/// 位置は1始まりの文字数（エラー表示用）。
fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, FormulaError> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let position = i + 1;

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            // 指数部は数字が続く場合のみ
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let mut j = i + 1;
                if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    while j < chars.len() && chars[j].is_ascii_digit() {
                        j += 1;
                    }
                    i = j;
                }
            }
            let literal: String = chars[start..i].iter().collect();
            let value = literal
                .parse::<f64>()
                .map_err(|_| FormulaError::UnexpectedToken {
                    found: literal.clone(),
                    position,
                })?;
            tokens.push((Token::Number(value), position));
            continue;
        }

        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let name: String = chars[start..i].iter().collect();
            tokens.push((Token::Ident(name), position));
            continue;
        }

        let token = match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            _ => return Err(FormulaError::UnexpectedCharacter { ch: c, position }),
        };
        tokens.push((token, position));
        i += 1;
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    depth: usize,
    operators: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn next(&mut self) -> Option<(Token, usize)> {
        let item = self.tokens.get(self.pos).cloned();
        if item.is_some() {
            self.pos += 1;
        }
        item
    }

    fn enter(&mut self) -> Result<(), FormulaError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(FormulaError::NestingTooDeep);
        }
        Ok(())
    }

    fn count_operator(&mut self) -> Result<(), FormulaError> {
        self.operators += 1;
        if self.operators > MAX_OPERATORS {
            return Err(FormulaError::NestingTooDeep);
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            self.count_operator()?;
            let rhs = self.term()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn term(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            self.count_operator()?;
            let rhs = self.unary()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn unary(&mut self) -> Result<Expr, FormulaError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                self.enter()?;
                let inner = self.unary()?;
                self.depth -= 1;
                Ok(Expr::Neg(Box::new(inner)))
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.enter()?;
                let inner = self.unary()?;
                self.depth -= 1;
                Ok(inner)
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Expr, FormulaError> {
        match self.next() {
            Some((Token::Number(n), _)) => Ok(Expr::Number(n)),
            Some((Token::Ident(name), _)) => {
                if is_known_variable(&name) {
                    Ok(Expr::Variable(name))
                } else {
                    Err(FormulaError::UnknownVariable(name))
                }
            }
            Some((Token::LParen, _)) => {
                self.enter()?;
                let inner = self.expr()?;
                self.depth -= 1;
                match self.next() {
                    Some((Token::RParen, _)) => Ok(inner),
                    Some((token, position)) => Err(FormulaError::UnexpectedToken {
                        found: token.describe(),
                        position,
                    }),
                    None => Err(FormulaError::UnexpectedEnd),
                }
            }
            Some((token, position)) => Err(FormulaError::UnexpectedToken {
                found: token.describe(),
                position,
            }),
            None => Err(FormulaError::UnexpectedEnd),
        }
    }
}

/// 計算式文字列を構文木にする
///
/// # Examples
/// ```
/// use seasoning_common::expr::parse_expression;
///
/// let expr = parse_expression("total * 0.08").unwrap();
/// let total = |name: &str| (name == "total").then_some(200.0);
/// assert_eq!(expr.evaluate(&total).unwrap(), 16.0);
/// ```
pub fn parse_expression(source: &str) -> Result<Expr, FormulaError> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Err(FormulaError::Empty);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
        operators: 0,
    };
    let expr = parser.expr()?;

    if let Some((token, position)) = parser.next() {
        return Err(FormulaError::UnexpectedToken {
            found: token.describe(),
            position,
        });
    }

    Ok(expr)
}
