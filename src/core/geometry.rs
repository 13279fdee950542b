//! 떠 있는 창의 이동/크기 조절 계산
//!
//! 화면(뷰포트) 좌표계는 좌상단 원점, 단위는 셀이다.
//! 포인터 세션은 창마다 하나만 존재하며, 누르기에서 시작해 떼기에서 끝난다.

use bitflags::bitflags;

bitflags! {
    /// 크기 조절 핸들이 담당하는 테두리 변 집합
    ///
    /// 모서리 핸들은 두 변의 합집합이다.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Edges: u8 {
        const TOP = 0b0001;
        const BOTTOM = 0b0010;
        const RIGHT = 0b0100;
        const LEFT = 0b1000;
    }
}

impl Edges {
    /// 여덟 개의 크기 조절 핸들 (N, NW, W, SW, S, SE, E, NE)
    #[cfg(test)]
    pub const HANDLES: [Edges; 8] = [
        Edges::TOP,
        Edges::TOP.union(Edges::LEFT),
        Edges::LEFT,
        Edges::LEFT.union(Edges::BOTTOM),
        Edges::BOTTOM,
        Edges::BOTTOM.union(Edges::RIGHT),
        Edges::RIGHT,
        Edges::RIGHT.union(Edges::TOP),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// 창의 위치와 크기
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PanelRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// 뷰포트 중앙에 배치한 사각형
    pub fn centered(viewport: Viewport, width: i32, height: i32) -> Self {
        let width = width.min(viewport.width).max(1);
        let height = height.min(viewport.height).max(1);
        Self::new(
            (viewport.width - width) / 2,
            (viewport.height - height) / 2,
            width,
            height,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// 클램핑 상수
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryLimits {
    /// 어느 방향으로든 화면 안에 남아야 하는 최소 길이
    pub min_visible: i32,
    pub min_width: i32,
    pub min_height: i32,
}

impl Default for GeometryLimits {
    fn default() -> Self {
        Self {
            min_visible: 4,
            min_width: 40,
            min_height: 10,
        }
    }
}

/// 창 위에서 포인터가 눌린 위치의 의미
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// 테두리 크기 조절 핸들
    Resize(Edges),
    /// 이동 트리거 (헤더)
    DragTrigger,
    /// 그 외 창 내부
    Inside,
}

/// 진행 중인 포인터 세션
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Idle,
    Dragging {
        start: Point,
        origin: Point,
    },
    Resizing {
        edges: Edges,
        start: Point,
        origin: PanelRect,
    },
}

/// 이동과 크기 조절이 가능한 떠 있는 창
#[derive(Debug, Clone)]
pub struct FloatingPanel {
    rect: PanelRect,
    limits: GeometryLimits,
    /// 창 상단 테두리 바로 아래부터 시작하는 트리거 높이
    trigger_height: i32,
    session: Session,
}

impl FloatingPanel {
    pub fn new(rect: PanelRect, limits: GeometryLimits, trigger_height: i32) -> Self {
        Self {
            rect,
            limits,
            trigger_height: trigger_height.max(1),
            session: Session::Idle,
        }
    }

    pub fn rect(&self) -> PanelRect {
        self.rect
    }

    #[cfg(test)]
    pub fn session(&self) -> Session {
        self.session
    }

    pub fn is_active(&self) -> bool {
        self.session != Session::Idle
    }

    /// 포인터 위치 판정. 크기 조절 핸들이 트리거보다 우선한다.
    pub fn hit_test(&self, point: Point) -> Option<Hit> {
        let rect = self.rect;
        if !rect.contains(point) {
            return None;
        }

        let mut edges = Edges::empty();
        if point.y == rect.y {
            edges |= Edges::TOP;
        } else if point.y == rect.bottom() - 1 {
            edges |= Edges::BOTTOM;
        }
        if point.x == rect.x {
            edges |= Edges::LEFT;
        } else if point.x == rect.right() - 1 {
            edges |= Edges::RIGHT;
        }
        if !edges.is_empty() {
            return Some(Hit::Resize(edges));
        }

        let trigger_top = rect.y + 1;
        if point.y >= trigger_top && point.y < trigger_top + self.trigger_height {
            return Some(Hit::DragTrigger);
        }
        Some(Hit::Inside)
    }

    /// 누르기: 판정 결과에 따라 세션 시작. 세션이 시작되면 true.
    pub fn press(&mut self, point: Point) -> Option<Hit> {
        let hit = self.hit_test(point)?;
        match hit {
            Hit::Resize(edges) => self.begin_resize(edges, point),
            Hit::DragTrigger => self.begin_drag(point),
            Hit::Inside => {}
        }
        Some(hit)
    }

    pub fn begin_drag(&mut self, point: Point) {
        self.session = Session::Dragging {
            start: point,
            origin: Point::new(self.rect.x, self.rect.y),
        };
    }

    pub fn begin_resize(&mut self, edges: Edges, point: Point) {
        self.session = Session::Resizing {
            edges,
            start: point,
            origin: self.rect,
        };
    }

    /// 포인터 이동. 창이 바뀌었으면 true.
    pub fn pointer_move(&mut self, point: Point, viewport: Viewport) -> bool {
        let next = match self.session {
            Session::Idle => return false,
            Session::Dragging { start, origin } => self.dragged(start, origin, point, viewport),
            Session::Resizing {
                edges,
                start,
                origin,
            } => self.resized(edges, start, origin, point, viewport),
        };
        let changed = next != self.rect;
        self.rect = next;
        changed
    }

    pub fn release(&mut self) {
        self.session = Session::Idle;
    }

    /// 뷰포트 크기가 바뀌었을 때 창이 사라지지 않도록 다시 맞춘다.
    pub fn fit_into(&mut self, viewport: Viewport) {
        let min_visible = self.limits.min_visible;
        self.rect.x = clamp(
            self.rect.x,
            -(self.rect.width - min_visible),
            viewport.width - min_visible,
        );
        self.rect.y = clamp(
            self.rect.y,
            self.top_floor(),
            viewport.height - min_visible,
        );
    }

    fn top_floor(&self) -> i32 {
        // 트리거가 최소 길이보다 높으면 그 차이만큼 위로 숨을 수 있다
        (self.limits.min_visible - self.trigger_height).min(0)
    }

    fn dragged(&self, start: Point, origin: Point, point: Point, viewport: Viewport) -> PanelRect {
        let min_visible = self.limits.min_visible;
        let dx = point.x - start.x;
        let dy = point.y - start.y;

        PanelRect {
            x: clamp(
                origin.x + dx,
                -(self.rect.width - min_visible),
                viewport.width - min_visible,
            ),
            y: clamp(origin.y + dy, self.top_floor(), viewport.height - min_visible),
            ..self.rect
        }
    }

    fn resized(
        &self,
        edges: Edges,
        start: Point,
        origin: PanelRect,
        point: Point,
        viewport: Viewport,
    ) -> PanelRect {
        let limits = self.limits;
        // 포인터를 먼저 뷰포트 안으로 제한한다. 그래서 위/왼쪽 변을 반대쪽 변 너머로
        // 끌면 창이 뒤집히지 않고 밀려난다.
        let dx = clamp(point.x, 0, viewport.width) - start.x;
        let dy = clamp(point.y, 0, viewport.height) - start.y;
        let mut next = self.rect;

        if edges.contains(Edges::TOP) {
            let height = origin.height - dy;
            next.y = clamp(
                origin.y + (origin.height - height),
                0,
                viewport.height - limits.min_visible,
            );
            next.height = height.max(limits.min_height);
        } else if edges.contains(Edges::BOTTOM) {
            next.height = (origin.height + dy).max(limits.min_height);
        }

        if edges.contains(Edges::LEFT) {
            let width = origin.width - dx;
            next.x = clamp(
                origin.x + (origin.width - width),
                0,
                viewport.width - limits.min_visible,
            );
            next.width = width.max(limits.min_width);
        } else if edges.contains(Edges::RIGHT) {
            next.width = (origin.width + dx).max(limits.min_width);
        }

        next
    }
}

/// 하한이 상한보다 커도 패닉하지 않는 clamp (하한 우선)
fn clamp(value: i32, min: i32, max: i32) -> i32 {
    value.min(max).max(min)
}
