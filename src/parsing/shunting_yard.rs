use super::operator::{Operator, FixityTypes, InfixProperties};
use super::source::Span;

use std::error::{Error as StdError};
use std::fmt::{self, Display, Formatter};

/// The kinds of grouping brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bracket {
  Paren,
  Brace,
}

/// A token, for the purposes of the shunting yard algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<T> {
  pub data: TokenData<T>,
  pub span: Span,
}

/// The contents of a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenData<T> {
  /// A value in the target language.
  Scalar(T),
  /// An operator. Whether it is used as a prefix or infix operator
  /// is decided by its position.
  Operator(Operator),
  OpenBracket(Bracket),
  /// The name of a function together with the bracket opening its
  /// argument, as in `sin(`.
  FunctionCallStart(String, Bracket),
  CloseBracket(Bracket),
}

/// Internal type which tracks an output value together with the
/// source span that produced it.
#[derive(Debug, Clone)]
struct OutputWithSpan<O> {
  output: O,
  span: Span,
}

#[derive(Clone, Debug)]
enum OpStackValue {
  Infix { operator: Operator, span: Span },
  Prefix { operator: Operator, span: Span },
  Open { bracket: Bracket, function: Option<String>, span: Span },
}

#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum ShuntingYardError<T, E: StdError> {
  CustomError(E),
  UnexpectedEOF,
  UnexpectedToken(Token<T>),
  UnclosedBracket(Bracket, Span),
  UnmatchedBracket(Bracket, Span),
}

/// A type implementing this trait is capable of driving the shunting
/// yard algorithm and compiling tokens to a given target language.
/// Every callback receives the span of source text covered by the
/// value being built.
pub trait ShuntingYardDriver<T> {
  type Output;
  type Error: StdError;

  fn compile_scalar(&mut self, scalar: T, span: Span) -> Result<Self::Output, Self::Error>;
  fn compile_infix_op(
    &mut self,
    left: Self::Output,
    operator: &Operator,
    right: Self::Output,
    span: Span,
  ) -> Result<Self::Output, Self::Error>;
  fn compile_prefix_op(
    &mut self,
    operator: &Operator,
    right: Self::Output,
    span: Span,
  ) -> Result<Self::Output, Self::Error>;
  fn compile_group(
    &mut self,
    bracket: Bracket,
    inner: Self::Output,
    span: Span,
  ) -> Result<Self::Output, Self::Error>;
  fn compile_call(
    &mut self,
    function: String,
    bracket: Bracket,
    argument: Self::Output,
    span: Span,
  ) -> Result<Self::Output, Self::Error>;
}

struct ParseState<O> {
  operator_stack: Vec<OpStackValue>,
  output_stack: Vec<OutputWithSpan<O>>,
  expecting_operand: bool,
}

impl Bracket {
  pub fn open_str(self) -> &'static str {
    match self {
      Bracket::Paren => "(",
      Bracket::Brace => "{",
    }
  }

  pub fn close_str(self) -> &'static str {
    match self {
      Bracket::Paren => ")",
      Bracket::Brace => "}",
    }
  }
}

impl<T> Token<T> {
  pub fn new(data: TokenData<T>, span: Span) -> Self {
    Self { data, span }
  }

  pub fn scalar(data: T, span: Span) -> Self {
    Self::new(TokenData::Scalar(data), span)
  }

  pub fn operator(op: Operator, span: Span) -> Self {
    Self::new(TokenData::Operator(op), span)
  }

  pub fn span(&self) -> Span {
    self.span
  }

  /// Whether this token can begin an operand. If such a token
  /// immediately follows a complete operand, the two are juxtaposed.
  fn starts_operand(&self) -> bool {
    matches!(
      self.data,
      TokenData::Scalar(_) | TokenData::OpenBracket(_) | TokenData::FunctionCallStart(_, _),
    )
  }
}

impl<T: Display> Display for TokenData<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
    match self {
      TokenData::Scalar(s) => s.fmt(f),
      TokenData::Operator(op) => op.display_name().fmt(f),
      TokenData::OpenBracket(b) => b.open_str().fmt(f),
      TokenData::FunctionCallStart(name, b) => write!(f, "{}{}", name, b.open_str()),
      TokenData::CloseBracket(b) => b.close_str().fmt(f),
    }
  }
}

impl<T: Display> Display for Token<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
    write!(f, "{}", self.data)
  }
}

impl<T: Display, E: StdError> Display for ShuntingYardError<T, E> {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
    match self {
      ShuntingYardError::CustomError(e) =>
        write!(f, "{}", e),
      ShuntingYardError::UnexpectedEOF =>
        write!(f, "unexpected end of input"),
      ShuntingYardError::UnexpectedToken(t) =>
        write!(f, "unexpected token {} at position {}", t.data, t.span),
      ShuntingYardError::UnclosedBracket(b, span) =>
        write!(f, "unclosed '{}' at position {}", b.open_str(), span),
      ShuntingYardError::UnmatchedBracket(b, span) =>
        write!(f, "unmatched '{}' at position {}", b.close_str(), span),
    }
  }
}

impl<T, E> StdError for ShuntingYardError<T, E>
where T: Display + fmt::Debug,
      E: StdError + 'static {
  fn source(&self) -> Option<&(dyn StdError + 'static)> {
    match self {
      ShuntingYardError::CustomError(e) => Some(e),
      _ => None,
    }
  }
}

impl<T, E: StdError> From<E> for ShuntingYardError<T, E> {
  fn from(e: E) -> Self {
    Self::CustomError(e)
  }
}

/// Parses the token sequence. If `juxtaposition` is given, two
/// adjacent operands are combined with that (infix) operator;
/// otherwise adjacent operands are an error.
pub fn parse<T, D, I>(
  driver: &mut D,
  input: I,
  juxtaposition: Option<&Operator>,
) -> Result<D::Output, ShuntingYardError<T, D::Error>>
where D: ShuntingYardDriver<T>,
      I: IntoIterator<Item = Token<T>> {
  let mut state = ParseState {
    operator_stack: Vec::new(),
    output_stack: Vec::new(),
    expecting_operand: true,
  };
  for token in input {
    if !state.expecting_operand && token.starts_operand() {
      let Some((op, infix)) = juxtaposition.and_then(|op| op.fixity().as_infix().map(|i| (op, i))) else {
        return Err(ShuntingYardError::UnexpectedToken(token));
      };
      let implicit_span = Span::new(token.span.start, token.span.start);
      state.push_infix(driver, op.clone(), infix, implicit_span)?;
      state.expecting_operand = true;
    }

    // Handle the current token.
    let span = token.span;
    match token.data {
      TokenData::Scalar(t) => {
        let output = driver.compile_scalar(t, span)?;
        state.output_stack.push(OutputWithSpan { output, span });
        state.expecting_operand = false;
      }
      TokenData::Operator(op) => {
        let types = op.fixity().fixity_types();
        if state.expecting_operand && types.contains(FixityTypes::PREFIX) {
          state.operator_stack.push(OpStackValue::Prefix { operator: op, span });
        } else if let (false, Some(infix)) = (state.expecting_operand, op.fixity().as_infix()) {
          state.push_infix(driver, op, infix, span)?;
          state.expecting_operand = true;
        } else {
          return Err(ShuntingYardError::UnexpectedToken(Token::operator(op, span)));
        }
      }
      TokenData::OpenBracket(bracket) => {
        state.operator_stack.push(OpStackValue::Open { bracket, function: None, span });
        state.expecting_operand = true;
      }
      TokenData::FunctionCallStart(name, bracket) => {
        state.operator_stack.push(OpStackValue::Open { bracket, function: Some(name), span });
        state.expecting_operand = true;
      }
      TokenData::CloseBracket(bracket) => {
        if state.expecting_operand {
          return Err(ShuntingYardError::UnexpectedToken(Token::new(TokenData::CloseBracket(bracket), span)));
        }
        state.close_bracket(driver, bracket, span)?;
      }
    }
  }

  if state.expecting_operand {
    return Err(ShuntingYardError::UnexpectedEOF);
  }

  // Pop and resolve remaining operators.
  while let Some(stack_value) = state.operator_stack.pop() {
    state.reduce(driver, stack_value)?;
  }

  let final_result = state.output_stack.pop().ok_or(ShuntingYardError::UnexpectedEOF)?;
  if !state.output_stack.is_empty() {
    return Err(ShuntingYardError::UnexpectedEOF);
  }
  Ok(final_result.output)
}

impl<O> ParseState<O> {
  fn push_infix<T, D>(
    &mut self,
    driver: &mut D,
    operator: Operator,
    infix: InfixProperties,
    span: Span,
  ) -> Result<(), ShuntingYardError<T, D::Error>>
  where D: ShuntingYardDriver<T, Output = O> {
    // Pop operators until we hit one with lower precedence.
    while let Some(top) = self.operator_stack.last() {
      let stack_prec = match top {
        OpStackValue::Infix { operator, .. } => operator.fixity().as_infix().map(|i| i.precedence()),
        OpStackValue::Prefix { operator, .. } => operator.fixity().as_prefix(),
        OpStackValue::Open { .. } => None,
      };
      match stack_prec {
        Some(prec) if infix.yields_to(prec) => {
          if let Some(stack_value) = self.operator_stack.pop() {
            self.reduce(driver, stack_value)?;
          }
        }
        _ => break,
      }
    }
    self.operator_stack.push(OpStackValue::Infix { operator, span });
    Ok(())
  }

  fn close_bracket<T, D>(
    &mut self,
    driver: &mut D,
    bracket: Bracket,
    close_span: Span,
  ) -> Result<(), ShuntingYardError<T, D::Error>>
  where D: ShuntingYardDriver<T, Output = O> {
    loop {
      match self.operator_stack.pop() {
        None => {
          return Err(ShuntingYardError::UnmatchedBracket(bracket, close_span));
        }
        Some(OpStackValue::Open { bracket: open, function, span: open_span }) => {
          if open != bracket {
            return Err(ShuntingYardError::UnexpectedToken(Token::new(TokenData::CloseBracket(bracket), close_span)));
          }
          let inner = self.output_stack.pop().ok_or(ShuntingYardError::UnexpectedEOF)?;
          let span = open_span.merge(close_span);
          let output = match function {
            Some(name) => driver.compile_call(name, bracket, inner.output, span)?,
            None => driver.compile_group(bracket, inner.output, span)?,
          };
          self.output_stack.push(OutputWithSpan { output, span });
          self.expecting_operand = false;
          return Ok(());
        }
        Some(stack_value) => {
          self.reduce(driver, stack_value)?;
        }
      }
    }
  }

  fn reduce<T, D>(
    &mut self,
    driver: &mut D,
    stack_value: OpStackValue,
  ) -> Result<(), ShuntingYardError<T, D::Error>>
  where D: ShuntingYardDriver<T, Output = O> {
    match stack_value {
      OpStackValue::Infix { operator, .. } => {
        let (arg1, arg2) = self.output_stack.pop()
          .and_then(|arg2| self.output_stack.pop().map(|arg1| (arg1, arg2)))
          .ok_or(ShuntingYardError::UnexpectedEOF)?;
        let span = arg1.span.merge(arg2.span);
        let output = driver.compile_infix_op(arg1.output, &operator, arg2.output, span)?;
        self.output_stack.push(OutputWithSpan { output, span });
      }
      OpStackValue::Prefix { operator, span } => {
        let arg = self.output_stack.pop().ok_or(ShuntingYardError::UnexpectedEOF)?;
        let span = span.merge(arg.span);
        let output = driver.compile_prefix_op(&operator, arg.output, span)?;
        self.output_stack.push(OutputWithSpan { output, span });
      }
      OpStackValue::Open { bracket, span, .. } => {
        return Err(ShuntingYardError::UnclosedBracket(bracket, span));
      }
    }
    Ok(())
  }
}
